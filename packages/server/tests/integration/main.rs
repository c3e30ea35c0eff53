mod common;

mod bookmarks;
mod comments;
mod companies;
mod users;
