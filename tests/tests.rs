mod controller;
mod data;
mod service;
mod util;
