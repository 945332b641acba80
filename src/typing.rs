//! Typing banner: reveals each word a character at a time, holds it, deletes it
//! and moves on to the next, forever.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::config::TypingSettings;
use crate::dom;
use crate::timer::{BrowserScheduler, Scheduler};

/// What the delay scheduled after the last tick stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausedFull,
    Deleting,
    PausedEmpty,
}

/// Output of one tick: text to display and how long until the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay_ms: i32,
}

#[derive(Clone, Debug)]
pub struct TypingMachine {
    words: Vec<Vec<char>>,
    word_idx: usize,
    chars: usize,
    phase: TypingPhase,
    timing: TypingSettings,
}

impl TypingMachine {
    /// Returns `None` when no non-empty word is left to animate.
    pub fn new(settings: &TypingSettings) -> Option<Self> {
        let words: Vec<Vec<char>> = settings
            .words
            .iter()
            .filter(|w| !w.is_empty())
            .map(|w| w.chars().collect())
            .collect();
        if words.is_empty() {
            return None;
        }
        Some(Self {
            words,
            word_idx: 0,
            chars: 0,
            phase: TypingPhase::Typing,
            timing: settings.clone(),
        })
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn word_index(&self) -> usize {
        self.word_idx
    }

    pub fn tick(&mut self) -> TypingFrame {
        use TypingPhase::*;
        let len = self.words[self.word_idx].len();
        let delay_ms = match self.phase {
            Typing | PausedEmpty => {
                self.chars = (self.chars + 1).min(len);
                if self.chars == len {
                    self.phase = PausedFull;
                    self.timing.pause_full_ms
                } else {
                    self.phase = Typing;
                    self.timing.type_ms
                }
            }
            PausedFull | Deleting => {
                self.chars = self.chars.saturating_sub(1);
                let text = self.visible();
                if self.chars == 0 {
                    self.phase = PausedEmpty;
                    self.word_idx = (self.word_idx + 1) % self.words.len();
                    return TypingFrame {
                        text,
                        delay_ms: self.timing.pause_empty_ms,
                    };
                }
                self.phase = Deleting;
                self.timing.delete_ms
            }
        };
        TypingFrame {
            text: self.visible(),
            delay_ms,
        }
    }

    fn visible(&self) -> String {
        self.words[self.word_idx][..self.chars].iter().collect()
    }
}

/// Tick the machine, hand the text to `render`, and reschedule itself.
pub fn drive<S, R>(machine: Rc<RefCell<TypingMachine>>, scheduler: Rc<S>, render: Rc<R>)
where
    S: Scheduler + 'static,
    R: Fn(&str) + 'static,
{
    let frame = machine.borrow_mut().tick();
    render(&frame.text);
    let next = scheduler.clone();
    scheduler.schedule(
        frame.delay_ms,
        Box::new(move || drive(machine, next, render)),
    );
}

pub fn init(settings: &TypingSettings) -> Result<(), JsValue> {
    let Some(el) = dom::by_id("typing")? else {
        dom::warn("typing: #typing not found, animation disabled");
        return Ok(());
    };
    let Some(machine) = TypingMachine::new(settings) else {
        dom::warn("typing: word list is empty, animation disabled");
        return Ok(());
    };
    let render = Rc::new(move |text: &str| el.set_text_content(Some(text)));
    drive(
        Rc::new(RefCell::new(machine)),
        Rc::new(BrowserScheduler),
        render,
    );
    Ok(())
}
