//! Home page: marketplace summary and pets available for adoption.

use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;

use adoptify_core::Pet;

use crate::error::CliError;
use crate::output;

use super::Context;
use super::pets::PetRow;
use super::util;

#[derive(Serialize)]
struct HomePage {
    shops: usize,
    pets: usize,
    available: Vec<Arc<Pet>>,
}

fn render(page: &HomePage, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading("Adoptify: find your new best friend", color));
    let _ = writeln!(
        out,
        "{} shops, {} pets, {} available for adoption\n",
        page.shops,
        page.pets,
        page.available.len()
    );
    if page.available.is_empty() {
        let _ = write!(out, "No pets are available for adoption right now.");
    } else {
        let rows: Vec<PetRow> = page.available.iter().map(|p| PetRow::from(&**p)).collect();
        let _ = write!(out, "{}", output::render_table(&rows));
    }
    out
}

pub async fn handle(ctx: &Context<'_>) -> Result<(), CliError> {
    let app = ctx.app;
    let (shops, pets) = util::with_spinner(ctx.global, "Loading...", app.mount()).await;
    util::settled(shops, "load shops", app.shops.error())?;
    util::settled(pets, "load pets", app.pets.error())?;

    let all_pets = app.pets.items();
    let page = HomePage {
        shops: app.shops.items().len(),
        pets: all_pets.len(),
        available: all_pets
            .iter()
            .filter(|p| p.status.is_adoptable())
            .cloned()
            .collect(),
    };

    let color = ctx.color();
    let out = output::render_single(
        &ctx.global.output,
        &page,
        |p| render(p, color),
        |p| {
            p.available
                .iter()
                .map(|pet| pet.id.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_marketplace_says_so() {
        let page = HomePage {
            shops: 1,
            pets: 2,
            available: Vec::new(),
        };
        let text = render(&page, false);
        assert!(text.contains("1 shops, 2 pets, 0 available"));
        assert!(text.contains("No pets are available"));
    }
}
