mod builder;
mod category;
