mod common;

mod resolution;
