mod alert;
mod coordinate;
mod position;
mod safe_location;
