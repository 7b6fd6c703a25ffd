mod app;
mod helper;
