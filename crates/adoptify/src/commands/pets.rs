//! Pet pages: listing, detail, and management.

use std::fmt::Write;
use std::sync::Arc;

use tabled::Tabled;

use adoptify_core::{AdoptionStatus, EntityId, Pet, UpdatePetRequest};

use crate::cli::{PetsArgs, PetsCommand};
use crate::error::CliError;
use crate::output;

use super::Context;
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub(crate) struct PetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Species")]
    species: String,
    #[tabled(rename = "Breed")]
    breed: String,
    #[tabled(rename = "Age")]
    age: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&Pet> for PetRow {
    fn from(p: &Pet) -> Self {
        Self {
            id: p.id.to_string(),
            name: p.name.clone(),
            species: p.species.clone(),
            breed: p.breed.clone().unwrap_or_default(),
            age: p.age.map(|a| a.to_string()).unwrap_or_default(),
            status: p.status.to_string(),
        }
    }
}

// ── Detail view ─────────────────────────────────────────────────────

fn detail(pet: &Pet, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&pet.name, color));
    let _ = writeln!(out, "  ID:       {}", pet.id);
    let _ = writeln!(out, "  Species:  {}", pet.species);
    if let Some(ref breed) = pet.breed {
        let _ = writeln!(out, "  Breed:    {breed}");
    }
    if let Some(age) = pet.age {
        let _ = writeln!(out, "  Age:      {age}");
    }
    let _ = writeln!(out, "  Status:   {}", output::paint_status(pet.status, color));
    if let Some(ref shop) = pet.shop {
        let _ = writeln!(out, "  Shop:     {shop}");
    }
    if let Some(ref image) = pet.image_url {
        let _ = writeln!(out, "  Picture:  {image}");
    }
    if let Some(created) = pet.created_at {
        let _ = writeln!(out, "  Listed:   {}", created.format("%Y-%m-%d"));
    }
    if let Some(ref description) = pet.description {
        let _ = write!(out, "\n{description}");
    }
    out.trim_end().to_owned()
}

// ── Pages ───────────────────────────────────────────────────────────

/// Pet listing page, optionally filtered.
pub async fn list(
    ctx: &Context<'_>,
    status: Option<AdoptionStatus>,
    species: Option<&str>,
) -> Result<(), CliError> {
    let pets = &ctx.app.pets;
    let settlement = util::with_spinner(ctx.global, "Loading pets...", pets.fetch_all()).await;
    util::settled(settlement, "list pets", pets.error())?;

    let items: Vec<Arc<Pet>> = pets
        .items()
        .iter()
        .filter(|p| status.is_none_or(|s| p.status == s))
        .filter(|p| species.is_none_or(|s| p.species.eq_ignore_ascii_case(s)))
        .cloned()
        .collect();

    let out = output::render_list(
        &ctx.global.output,
        &items,
        |p| PetRow::from(&**p),
        |p| p.id.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

/// Pet detail page.
pub async fn show(ctx: &Context<'_>, id: &EntityId) -> Result<(), CliError> {
    let pets = &ctx.app.pets;
    let settlement = util::with_spinner(ctx.global, "Loading pet...", pets.get_by_id(id)).await;
    util::settled(settlement, "show pet", pets.error())?;

    let Some(pet) = pets.detail() else {
        return Err(CliError::ActionFailed {
            action: "show pet".into(),
            message: format!("no pet returned for '{id}'"),
        });
    };
    let color = ctx.color();
    let out = output::render_single(
        &ctx.global.output,
        &*pet,
        |p| detail(p, color),
        |p| p.id.to_string(),
    );
    output::print_output(&out, ctx.global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(ctx: &Context<'_>, args: PetsArgs) -> Result<(), CliError> {
    let pets = &ctx.app.pets;
    let quiet = ctx.global.quiet;

    match args.command {
        PetsCommand::List { status, species } => {
            list(ctx, status.map(AdoptionStatus::from), species.as_deref()).await
        }

        PetsCommand::Show { id } => show(ctx, &id).await,

        PetsCommand::Create { pet, shop } => {
            let request = pet.into_request(shop);
            let settlement =
                util::with_spinner(ctx.global, "Creating pet...", pets.create(&request)).await;
            util::settled(settlement, "create pet", pets.error())?;
            output::print_status(&pets.message().unwrap_or_else(|| "Pet created".into()), quiet);
            Ok(())
        }

        PetsCommand::Update {
            id,
            name,
            species,
            breed,
            age,
            description,
            image_url,
            status,
        } => {
            let request = UpdatePetRequest {
                name,
                species,
                breed,
                age,
                description,
                image_url,
                status: status.map(AdoptionStatus::from),
            };
            if request.is_empty() {
                return Err(CliError::Validation {
                    field: "update".into(),
                    reason: "nothing to change; pass at least one field".into(),
                });
            }
            let settlement = util::with_spinner(
                ctx.global,
                "Updating pet...",
                pets.update_by_id(&id, &request),
            )
            .await;
            util::settled(settlement, "update pet", pets.error())?;
            output::print_status(&pets.message().unwrap_or_else(|| "Pet updated".into()), quiet);
            Ok(())
        }

        PetsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete pet '{id}'?"), ctx.global.yes)? {
                return Ok(());
            }
            let settlement =
                util::with_spinner(ctx.global, "Deleting pet...", pets.delete_by_id(&id)).await;
            util::settled(settlement, "delete pet", pets.error())?;
            output::print_status(&pets.message().unwrap_or_else(|| "Pet deleted".into()), quiet);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fido() -> Pet {
        Pet {
            id: EntityId::from("p1"),
            name: "Fido".into(),
            species: "dog".into(),
            breed: Some("Beagle".into()),
            age: Some(3),
            description: Some("Loves walks.".into()),
            image_url: None,
            status: AdoptionStatus::Available,
            shop: Some(EntityId::from("s1")),
            created_at: None,
        }
    }

    #[test]
    fn detail_lists_known_fields() {
        let text = detail(&fido(), false);
        assert!(text.starts_with("Fido"));
        assert!(text.contains("Breed:    Beagle"));
        assert!(text.contains("Status:   available"));
        assert!(text.contains("Shop:     s1"));
        assert!(text.ends_with("Loves walks."));
        assert!(!text.contains("Picture"));
    }

    #[test]
    fn row_leaves_missing_fields_blank() {
        let mut pet = fido();
        pet.breed = None;
        pet.age = None;
        let row = PetRow::from(&pet);
        assert!(row.breed.is_empty());
        assert!(row.age.is_empty());
    }
}
