//! bookstore author commands (authors, add-author)

use crate::error::Result;
use crate::model::Author;
use crate::output::HumanReport;
use crate::session::SessionToken;
use crate::store::JsonBookstore;

use super::Context;

#[derive(serde::Serialize)]
struct AuthorListReport {
    authors: Vec<Author>,
}

pub fn run_list(ctx: &Context) -> Result<()> {
    let store = open_store(ctx);
    let authors = store.authors()?;

    let human = authors.iter().fold(
        HumanReport::new(format!("bookstore authors: {}", authors.len())),
        |human, author| human.row(format!("{:>4}  {}", author.id.0, author.name)),
    );

    ctx.emit("authors", &AuthorListReport { authors }, human)
}

pub fn run_add(ctx: &Context, name: &str) -> Result<()> {
    let store = open_store(ctx);
    let author = store.add_author(name)?;

    let human = HumanReport::new(format!("bookstore add-author: {}", author.name))
        .field("id", author.id);

    ctx.emit("add-author", &author, human)
}

pub(super) fn open_store(ctx: &Context) -> JsonBookstore {
    JsonBookstore::open(&ctx.dir, SessionToken::new(ctx.config.session.token.clone()))
}
