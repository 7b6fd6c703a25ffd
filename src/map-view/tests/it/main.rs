mod run;
mod view;
