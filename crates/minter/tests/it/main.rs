mod utils;

mod page;
mod wallet;
