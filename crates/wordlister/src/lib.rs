pub mod handlers;
pub mod pipeline;
pub mod wordlist;

pub use handlers::{AppState, router};
pub use wordlist::{FrequencyTable, Wordlist};
