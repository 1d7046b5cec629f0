use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadMore => {
            if state.begin_fetch() {
                vec![Effect::FetchNextPage]
            } else {
                Vec::new()
            }
        }
        Msg::PageLoaded(page) => {
            state.apply_page(page);
            Vec::new()
        }
        Msg::DetailRequested { index } => resolve_effect(&mut state, index),
        Msg::DetailResolved { index, detail } => match state.apply_detail(index, detail) {
            Some(url) => vec![Effect::LoadSprite { index, url }],
            None => Vec::new(),
        },
        Msg::SpriteLoaded { index, image } => {
            state.apply_sprite(index, image);
            Vec::new()
        }
        Msg::EntrySelected { index } => {
            if state.open_details(index) {
                resolve_effect(&mut state, index)
            } else {
                Vec::new()
            }
        }
        Msg::NavigateBack => {
            state.navigate_back();
            Vec::new()
        }
    };

    (state, effects)
}

fn resolve_effect(state: &mut AppState, index: usize) -> Vec<Effect> {
    match state.request_detail(index) {
        Some(name) => vec![Effect::ResolveDetail { index, name }],
        None => Vec::new(),
    }
}
