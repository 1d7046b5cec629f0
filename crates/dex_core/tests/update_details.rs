use std::sync::Once;

use dex_core::{
    update, AppState, DetailSlot, Effect, Msg, PokemonDetail, ResourcePage, ResourceRef, Screen,
    SpriteImage, SpriteState,
};
use pretty_assertions::assert_eq;
use url::Url;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(dex_logging::initialize_for_tests);
}

fn loaded_state(names: &[&str]) -> AppState {
    let results = names
        .iter()
        .map(|name| ResourceRef::new(*name, format!("https://pokeapi.co/api/v2/pokemon/{name}/")))
        .collect();
    let (state, _) = update(AppState::new(), Msg::LoadMore);
    let (mut state, _) = update(state, Msg::PageLoaded(Some(ResourcePage::new(results))));
    state.consume_dirty();
    state
}

fn sprite_url(id: u32) -> Url {
    Url::parse(&format!(
        "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/{id}.png"
    ))
    .unwrap()
}

fn bulbasaur() -> PokemonDetail {
    PokemonDetail {
        id: 1,
        name: "bulbasaur".to_string(),
        sprite_url: Some(sprite_url(1)),
    }
}

#[test]
fn detail_request_issues_lookup_once() {
    init_logging();
    let state = loaded_state(&["bulbasaur", "ivysaur"]);

    let (state, effects) = update(state, Msg::DetailRequested { index: 0 });
    assert_eq!(
        effects,
        vec![Effect::ResolveDetail {
            index: 0,
            name: "bulbasaur".to_string()
        }]
    );

    let (state, effects) = update(state, Msg::DetailRequested { index: 0 });
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(bulbasaur()),
        },
    );
    let (_state, effects) = update(state, Msg::DetailRequested { index: 0 });
    assert!(effects.is_empty());
}

#[test]
fn resolved_detail_with_sprite_loads_image() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::DetailRequested { index: 0 });

    let (state, effects) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(bulbasaur()),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::LoadSprite {
            index: 0,
            url: sprite_url(1)
        }]
    );
    assert!(state.has_in_flight());

    let (state, effects) = update(
        state,
        Msg::SpriteLoaded {
            index: 0,
            image: Some(SpriteImage {
                byte_len: 512,
                content_type: Some("image/png".to_string()),
            }),
        },
    );
    assert!(effects.is_empty());
    assert!(!state.has_in_flight());

    let row = &state.view().entries[0];
    assert_eq!(row.detail, DetailSlot::Resolved(bulbasaur()));
    assert!(matches!(row.sprite, SpriteState::Loaded(SpriteImage { byte_len: 512, .. })));
}

#[test]
fn detail_without_sprite_skips_image() {
    init_logging();
    let state = loaded_state(&["missingno"]);
    let (state, _) = update(state, Msg::DetailRequested { index: 0 });
    let detail = PokemonDetail {
        id: 0,
        name: "missingno".to_string(),
        sprite_url: None,
    };

    let (state, effects) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(detail),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view().entries[0].sprite, SpriteState::NotRequested);
}

#[test]
fn absent_detail_marks_entry_unavailable_and_keeps_it_listed() {
    init_logging();
    let state = loaded_state(&["bulbasaur", "ivysaur"]);
    let (state, _) = update(state, Msg::DetailRequested { index: 1 });
    let (state, effects) = update(
        state,
        Msg::DetailResolved {
            index: 1,
            detail: None,
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.entries.len(), 2);
    assert_eq!(view.entries[1].detail, DetailSlot::Unavailable);

    let (_state, effects) = update(state, Msg::DetailRequested { index: 1 });
    assert!(effects.is_empty());
}

#[test]
fn failed_sprite_is_recorded() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::DetailRequested { index: 0 });
    let (state, _) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(bulbasaur()),
        },
    );
    let (state, _) = update(state, Msg::SpriteLoaded { index: 0, image: None });

    assert_eq!(state.view().entries[0].sprite, SpriteState::Failed);
}

#[test]
fn selecting_entry_navigates_and_resolves() {
    init_logging();
    let state = loaded_state(&["bulbasaur", "ivysaur"]);

    let (mut state, effects) = update(state, Msg::EntrySelected { index: 1 });

    assert_eq!(
        effects,
        vec![Effect::ResolveDetail {
            index: 1,
            name: "ivysaur".to_string()
        }]
    );
    assert!(state.consume_dirty());
    match state.view().screen {
        Screen::Details(row) => {
            assert_eq!(row.name, "ivysaur");
            assert_eq!(row.detail, DetailSlot::Resolving);
        }
        Screen::Catalog => panic!("expected details screen"),
    }
}

#[test]
fn details_screen_reflects_late_resolution() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::EntrySelected { index: 0 });
    let (state, _) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(bulbasaur()),
        },
    );

    match state.view().screen {
        Screen::Details(row) => assert_eq!(row.detail, DetailSlot::Resolved(bulbasaur())),
        Screen::Catalog => panic!("expected details screen"),
    }
}

#[test]
fn reselecting_resolved_entry_does_not_lookup_again() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::EntrySelected { index: 0 });
    let (state, _) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(bulbasaur()),
        },
    );
    let (state, _) = update(state, Msg::NavigateBack);
    let (state, effects) = update(state, Msg::EntrySelected { index: 0 });

    assert!(effects.is_empty());
    assert_eq!(state.navigation().depth(), 1);
}

#[test]
fn back_returns_to_catalog() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::EntrySelected { index: 0 });
    let (state, _) = update(state, Msg::NavigateBack);

    assert_eq!(state.view().screen, Screen::Catalog);
    assert!(state.navigation().is_at_root());
}

#[test]
fn out_of_range_selection_is_ignored() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (mut next, effects) = update(state.clone(), Msg::EntrySelected { index: 5 });

    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
    assert_eq!(next, state);

    let (_next, effects) = update(next, Msg::DetailRequested { index: 5 });
    assert!(effects.is_empty());
}

#[test]
fn entries_from_later_pages_get_their_own_binding() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::LoadMore);
    let (state, _) = update(
        state,
        Msg::PageLoaded(Some(ResourcePage::new(vec![ResourceRef::new(
            "venusaur",
            "https://pokeapi.co/api/v2/pokemon/3/",
        )]))),
    );

    let (_state, effects) = update(state, Msg::DetailRequested { index: 1 });
    assert_eq!(
        effects,
        vec![Effect::ResolveDetail {
            index: 1,
            name: "venusaur".to_string()
        }]
    );
}

#[test]
fn repeated_detail_result_does_not_redraw() {
    init_logging();
    let state = loaded_state(&["bulbasaur"]);
    let (state, _) = update(state, Msg::DetailRequested { index: 0 });
    let (mut state, _) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: None,
        },
    );
    assert!(state.consume_dirty());
    let before = state.clone();

    let (mut state, effects) = update(
        state,
        Msg::DetailResolved {
            index: 0,
            detail: Some(bulbasaur()),
        },
    );

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state, before);
    assert_eq!(state.view().entries[0].detail, DetailSlot::Unavailable);
}
