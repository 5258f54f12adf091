mod catalog;
mod dashboard;
mod directory;
mod dispatch;
mod helpers;
mod notifier;
mod position;
mod voice;
