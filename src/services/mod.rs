pub mod joke;

pub use joke::{Joke, JokeClient, JokeError};
