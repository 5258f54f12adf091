mod config;
mod directory;
mod paths;
mod tab;
