#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use anyhow::Result;
use core_actions::PromptIo;
use core_events::Key;
use core_state::{EditorState, StateOptions, View};
use core_text::Buffer;
use std::collections::VecDeque;

/// Prompt I/O fed from a fixed key script. Records the status line seen at
/// every refresh.
#[derive(Default)]
pub struct ScriptedIo {
    keys: VecDeque<Key>,
    pub refreshes: Vec<Option<String>>,
}

impl ScriptedIo {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            refreshes: Vec::new(),
        }
    }

    pub fn typed(text: &str, then: impl IntoIterator<Item = Key>) -> Self {
        Self::new(text.bytes().map(Key::Byte).chain(then))
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl PromptIo for ScriptedIo {
    fn refresh(&mut self, state: &mut EditorState) -> Result<()> {
        self.refreshes.push(state.status_text().map(str::to_owned));
        Ok(())
    }

    fn read_key(&mut self, _state: &mut EditorState) -> Result<Option<Key>> {
        Ok(self.keys.pop_front())
    }
}

pub fn state_with(text: &[u8]) -> EditorState {
    EditorState::new(
        Buffer::from_bytes(text, 4),
        View::for_terminal(80, 24),
        StateOptions::default(),
    )
}

pub fn lines_of(state: &EditorState) -> Vec<String> {
    state
        .buffer
        .lines()
        .iter()
        .map(|l| String::from_utf8_lossy(l.raw()).into_owned())
        .collect()
}

pub fn press(state: &mut EditorState, keys: impl IntoIterator<Item = Key>) -> bool {
    let mut io = ScriptedIo::default();
    let mut quit = false;
    for key in keys {
        quit = core_actions::dispatch(key, state, &mut io)
            .expect("dispatch without prompt")
            .quit;
    }
    quit
}
