//! Shop pages.

use std::fmt::Write;
use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use adoptify_core::{CreateShopRequest, EntityId, Pet, Shop, UpdateShopRequest};

use crate::cli::{ShopsArgs, ShopsCommand};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ShopRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Pets")]
    pets: usize,
}

impl From<&Shop> for ShopRow {
    fn from(s: &Shop) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.clone(),
            location: s.location.clone().unwrap_or_default(),
            pets: s.pet_count(),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

/// A shop with whichever of its pets the pet collection could resolve.
#[derive(Serialize)]
struct ShopPage {
    #[serde(flatten)]
    shop: Arc<Shop>,
    #[serde(skip)]
    listed: Vec<Arc<Pet>>,
}

fn detail(page: &ShopPage, color: bool) -> String {
    let shop = &page.shop;
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&shop.name, color));
    let _ = writeln!(out, "  ID:        {}", shop.id);
    if let Some(ref location) = shop.location {
        let _ = writeln!(out, "  Location:  {location}");
    }
    if let Some(ref description) = shop.description {
        let _ = writeln!(out, "\n{description}");
    }
    let _ = writeln!(out, "\n{}", output::heading("Pets", color));
    if shop.pets.is_empty() {
        let _ = write!(out, "  This shop has no pets listed.");
    }
    for id in &shop.pets {
        match page.listed.iter().find(|p| &p.id == id) {
            Some(pet) => {
                let _ = writeln!(
                    out,
                    "  {id}  {} ({}, {})",
                    pet.name,
                    pet.species,
                    output::paint_status(pet.status, color)
                );
            }
            None => {
                let _ = writeln!(out, "  {id}");
            }
        }
    }
    out.trim_end().to_owned()
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub async fn handle(ctx: &Context<'_>, args: ShopsArgs) -> Result<(), CliError> {
    let shops = &ctx.app.shops;
    let quiet = ctx.global.quiet;

    match args.command {
        ShopsCommand::List => {
            let settlement =
                util::with_spinner(ctx.global, "Loading shops...", shops.fetch_all()).await;
            util::settled(settlement, "list shops", shops.error())?;

            let items = shops.items();
            let out = output::render_list(
                &ctx.global.output,
                &items,
                |s| ShopRow::from(&**s),
                |s| s.id.to_string(),
            );
            output::print_output(&out, quiet);
            Ok(())
        }

        ShopsCommand::Show { id } => {
            let pets = &ctx.app.pets;
            let (settlement, pets_loaded) = util::with_spinner(ctx.global, "Loading shop...", async {
                tokio::join!(shops.get_by_id(&id), pets.fetch_all())
            })
            .await;
            util::settled(settlement, "show shop", shops.error())?;

            let Some(shop) = shops.detail() else {
                return Err(CliError::ActionFailed {
                    action: "show shop".into(),
                    message: format!("no shop returned for '{id}'"),
                });
            };
            // Pet names are a nicety; fall back to bare ids.
            let state = pets.state();
            let listed = if pets_loaded.is_applied() {
                shop.pets.iter().filter_map(|pid| state.find(pid)).collect()
            } else {
                Vec::new()
            };

            let page = ShopPage { shop, listed };
            let color = ctx.color();
            let out = output::render_single(
                &ctx.global.output,
                &page,
                |p| detail(p, color),
                |p| p.shop.id.to_string(),
            );
            output::print_output(&out, quiet);
            Ok(())
        }

        ShopsCommand::Create {
            name,
            location,
            description,
        } => {
            let request = CreateShopRequest {
                name,
                location,
                description,
            };
            let settlement =
                util::with_spinner(ctx.global, "Creating shop...", shops.create(&request)).await;
            util::settled(settlement, "create shop", shops.error())?;
            output::print_status(&shops.message().unwrap_or_else(|| "Shop created".into()), quiet);
            Ok(())
        }

        ShopsCommand::Update {
            id,
            name,
            location,
            description,
        } => {
            let request = UpdateShopRequest {
                name,
                location,
                description,
            };
            if request.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one field".into(),
                });
            }
            let settlement = util::with_spinner(
                ctx.global,
                "Updating shop...",
                shops.update_by_id(&id, &request),
            )
            .await;
            util::settled(settlement, "update shop", shops.error())?;
            output::print_status(&shops.message().unwrap_or_else(|| "Shop updated".into()), quiet);
            Ok(())
        }

        ShopsCommand::Delete { id } => {
            if !util::confirm(
                &format!("Delete shop '{id}'? Its listing is removed for everyone."),
                ctx.global.yes,
            )? {
                return Ok(());
            }
            let settlement =
                util::with_spinner(ctx.global, "Deleting shop...", shops.delete_by_id(&id)).await;
            util::settled(settlement, "delete shop", shops.error())?;
            output::print_status(&shops.message().unwrap_or_else(|| "Shop deleted".into()), quiet);
            Ok(())
        }

        ShopsCommand::AddPet { shop, pet } => {
            add_pet(ctx, &shop, pet.into_request(None)).await
        }
    }
}

async fn add_pet(
    ctx: &Context<'_>,
    shop: &EntityId,
    request: adoptify_core::CreatePetRequest,
) -> Result<(), CliError> {
    let shops = &ctx.app.shops;
    let settlement = util::with_spinner(
        ctx.global,
        "Adding pet...",
        shops.add_child(shop, &request),
    )
    .await;
    util::settled(settlement, "add pet to shop", shops.error())?;
    output::print_status(
        &shops
            .message()
            .unwrap_or_else(|| format!("Pet added to shop {shop}")),
        ctx.global.quiet,
    );
    Ok(())
}
