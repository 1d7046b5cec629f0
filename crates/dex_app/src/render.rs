use std::io::{self, Write};

use dex_core::{AppViewModel, DetailSlot, EntryRowView, PaginationState, Screen, SpriteState};

pub const HELP: &str = "commands: more | list | show <n> | back | help | quit";

pub fn render(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    match &view.screen {
        Screen::Catalog => render_catalog(out, view),
        Screen::Details(row) => render_details(out, row),
    }
}

pub fn render_catalog(out: &mut impl Write, view: &AppViewModel) -> io::Result<()> {
    for row in &view.entries {
        let (r, g, b) = row.color;
        let id = match &row.detail {
            DetailSlot::Resolved(detail) => format!(" #{}", detail.id),
            _ => String::new(),
        };
        writeln!(
            out,
            "{:>4}. {:<24} [#{:02x}{:02x}{:02x}]{}",
            row.index + 1,
            capitalized(&row.name),
            r,
            g,
            b,
            id
        )?;
    }
    let status = match view.pagination {
        PaginationState::IdleMoreAvailable => "more available, type `more`",
        PaginationState::Fetching => "loading...",
        PaginationState::Exhausted => "end of catalog",
    };
    writeln!(out, "-- {} entries, {} --", view.entries.len(), status)
}

pub fn render_details(out: &mut impl Write, row: &EntryRowView) -> io::Result<()> {
    writeln!(out, "== {} ==", capitalized(&row.name))?;
    match &row.detail {
        DetailSlot::Unresolved | DetailSlot::Resolving => writeln!(out, "details: loading...")?,
        DetailSlot::Unavailable => writeln!(out, "details: unavailable")?,
        DetailSlot::Resolved(detail) => {
            writeln!(out, "id: {}", detail.id)?;
            match &detail.sprite_url {
                Some(url) => writeln!(out, "sprite: {} ({})", url, sprite_status(&row.sprite))?,
                None => writeln!(out, "sprite: none")?,
            }
        }
    }
    writeln!(out, "(type `back` to return)")
}

fn sprite_status(sprite: &SpriteState) -> String {
    match sprite {
        SpriteState::NotRequested => "not loaded".to_string(),
        SpriteState::Loading => "loading".to_string(),
        SpriteState::Loaded(image) => match &image.content_type {
            Some(content_type) => format!("{} bytes, {}", image.byte_len, content_type),
            None => format!("{} bytes", image.byte_len),
        },
        SpriteState::Failed => "failed to load".to_string(),
    }
}

/// Upper-cases the first letter of every word; `mr-mime` becomes `Mr-Mime`.
pub fn capitalized(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
        at_word_start = !ch.is_alphanumeric();
    }
    out
}
