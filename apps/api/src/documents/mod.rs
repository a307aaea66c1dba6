// Document upload → plain text. Parsing is delegated to `extraction`.

pub mod handlers;
