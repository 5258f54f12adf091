mod error;
mod logger;
mod render;
mod repl;
