use super::types::BookSource;

const BOOKS: [(u32, &str, &str, &str); 10] = [
    (2701, "Moby Dick", "Herman Melville", "Adventure"),
    (11, "Alice's Adventures in Wonderland", "Lewis Carroll", "Fantasy"),
    (76, "Adventures of Huckleberry Finn", "Mark Twain", "Adventure"),
    (74, "The Adventures of Tom Sawyer", "Mark Twain", "Adventure"),
    (345, "Dracula", "Bram Stoker", "Horror"),
    (174, "The Picture of Dorian Gray", "Oscar Wilde", "Gothic"),
    (514, "Little Women", "Louisa May Alcott", "Fiction"),
    (46, "A Christmas Carol", "Charles Dickens", "Fiction"),
    (1342, "Pride and Prejudice", "Jane Austen", "Romance"),
    (84, "Frankenstein", "Mary Shelley", "Gothic"),
];

/// The fixed set of books the library is built from, in ingestion order.
pub fn default_catalog() -> Vec<BookSource> {
    BOOKS
        .iter()
        .map(|(id, title, author, genre)| BookSource::new(*id, title, author, genre))
        .collect()
}
