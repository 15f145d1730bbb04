mod client;
mod project;
mod support;
