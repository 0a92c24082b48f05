//=========================================================================
// Combination
//=========================================================================
//
// The chest lock: three clue words dragged into three ordered blanks.
//
// Card moves:
//   tray  → blank    fills it; a card already there goes back to the tray
//   blank → blank    empties the source blank
//   blank → nowhere  back to the tray
//
// The submit button only exists while every blank is filled. A wrong
// order shows a mismatch line and leaves the blanks as they are; the line
// clears when the next card is picked up.
//
//=========================================================================

//=== External Crates =====================================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::Verdict;
use crate::core::game_state::ClueColor;
use crate::core::geometry::Rect;
use crate::core::input::{Drag, DragEvent, DragInput, DropSurface, StateTracker};
use crate::core::scene::{DialogBox, Sprite, Stage};

//=== Content =============================================================

pub const SENTENCE: &str =
    "Aus der ___ der Knechtschaft durch ___ Schlachten ans ___ Licht der Freiheit.";

/// Tray order of the word cards.
pub const WORDS: [(ClueColor, &str); 3] = [
    (ClueColor::Black, "SWARTZ"),
    (ClueColor::Red, "BLUTEGE"),
    (ClueColor::Gold, "GOLDENE"),
];

pub const SOLUTION: [ClueColor; 3] = [ClueColor::Black, ClueColor::Red, ClueColor::Gold];

pub const SUBMIT_LABEL: &str = "ОТКРЫТЬ";
pub const MISMATCH: &str = "ЧТО-ТО НЕ ТО!";

pub fn word(color: ClueColor) -> &'static str {
    WORDS
        .iter()
        .find(|(c, _)| *c == color)
        .map(|(_, w)| *w)
        .unwrap_or_default()
}

//=== Layout ==============================================================

const CARD_WIDTH: f32 = 200.0;
const CARD_HEIGHT: f32 = 70.0;
const COLUMNS: [f32; 3] = [420.0, 860.0, 1300.0];
const TRAY_Y: f32 = 300.0;
const BLANK_Y: f32 = 600.0;

pub const SUBMIT_RECT: Rect = Rect::new(810.0, 800.0, 300.0, 90.0);

fn tray_rect(color: ClueColor) -> Rect {
    let column = WORDS.iter().position(|(c, _)| *c == color).unwrap_or(0);
    Rect::new(COLUMNS[column], TRAY_Y, CARD_WIDTH, CARD_HEIGHT)
}

pub fn blank_rect(index: usize) -> Rect {
    Rect::new(COLUMNS[index % COLUMNS.len()], BLANK_Y, CARD_WIDTH, CARD_HEIGHT)
}

//=== Pick ================================================================

/// Where a card was picked up from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Tray,
    Blank(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pick {
    pub color: ClueColor,
    pub from: Slot,
}

//=== Blanks ==============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Blanks([Option<ClueColor>; 3]);

impl Blanks {
    fn holds(&self, color: ClueColor) -> bool {
        self.0.contains(&Some(color))
    }

    fn remove(&mut self, color: ClueColor) {
        for blank in self.0.iter_mut().filter(|b| **b == Some(color)) {
            *blank = None;
        }
    }

    /// Puts `color` into blank `index`. Whatever was there drops back to
    /// the tray.
    fn place(&mut self, color: ClueColor, index: usize) {
        self.remove(color);
        if let Some(blank) = self.0.get_mut(index) {
            *blank = Some(color);
        }
    }

    fn is_filled(&self) -> bool {
        self.0.iter().all(Option::is_some)
    }
}

impl DropSurface for Blanks {
    type Item = Pick;
    type Target = usize;

    fn item_at(&self, x: f32, y: f32) -> Option<Pick> {
        let in_blank = self.0.iter().enumerate().find_map(|(i, blank)| {
            let color = (*blank)?;
            blank_rect(i).contains(x, y).then_some(Pick { color, from: Slot::Blank(i) })
        });

        in_blank.or_else(|| {
            WORDS
                .iter()
                .map(|(color, _)| *color)
                .find(|&color| !self.holds(color) && tray_rect(color).contains(x, y))
                .map(|color| Pick { color, from: Slot::Tray })
        })
    }

    fn target_at(&self, x: f32, y: f32) -> Option<usize> {
        (0..self.0.len()).find(|&i| blank_rect(i).contains(x, y))
    }
}

//=== Combination =========================================================

pub struct Combination {
    blanks: Blanks,
    drag: Drag<Pick>,
    mismatch: bool,
}

impl Combination {
    pub fn new(touch_device: bool) -> Self {
        Self {
            blanks: Blanks::default(),
            drag: Drag::for_device(touch_device),
            mismatch: false,
        }
    }

    pub fn blanks(&self) -> [Option<ClueColor>; 3] {
        self.blanks.0
    }

    pub fn is_filled(&self) -> bool {
        self.blanks.is_filled()
    }

    pub fn shows_mismatch(&self) -> bool {
        self.mismatch
    }

    /// Checks the current order. Only meaningful once every blank is
    /// filled.
    pub fn submit(&mut self) -> Verdict {
        let verdict = Verdict::from_bool(self.blanks.0 == SOLUTION.map(Some));
        debug!("Chest combination {:?} is {:?}", self.blanks.0, verdict);
        self.mismatch = verdict == Verdict::Wrong;
        verdict
    }

    /// Advances drags and the submit button. Returns a verdict on the
    /// frame the button is pressed.
    pub fn update(&mut self, input: &StateTracker) -> Option<Verdict> {
        match self.drag.poll(input, &self.blanks) {
            Some(DragEvent::Lifted(pick)) => {
                self.mismatch = false;
                if let Slot::Blank(i) = pick.from {
                    self.blanks.0[i] = None;
                }
            }
            Some(DragEvent::Dropped { item, target }) => {
                self.mismatch = false;
                self.blanks.place(item.color, target);
            }
            Some(DragEvent::Released(item)) => self.blanks.remove(item.color),
            None => {
                if self.drag.held().is_none() && self.is_filled() {
                    if let Some((x, y)) = input.pointer_pressed() {
                        if SUBMIT_RECT.contains(x, y) {
                            return Some(self.submit());
                        }
                    }
                }
            }
        }
        None
    }

    pub fn render(&self, input: &StateTracker, stage: &mut Stage) {
        stage.dialog = Some(DialogBox::text(SENTENCE));

        for i in 0..self.blanks.0.len() {
            stage.push(Sprite::new(format!("blank:{}", i), blank_rect(i)));
        }

        let held = self.drag.held();
        for &(color, text) in &WORDS {
            let key = format!("word:{}", color.name());
            let sprite = match (held, self.blanks.0.iter().position(|b| *b == Some(color))) {
                (Some(pick), _) if pick.color == color => {
                    let (x, y) = self.drag.position(input).unwrap_or_default();
                    let rect = tray_rect(color);
                    Sprite::new(key, rect.moved_to(x - rect.width / 2.0, y - rect.height / 2.0))
                        .highlighted(true)
                }
                (_, Some(i)) => Sprite::new(key, blank_rect(i)),
                (_, None) => Sprite::new(key, tray_rect(color)),
            };
            stage.push(sprite.with_label(text));
        }

        if self.is_filled() {
            stage.push(Sprite::new("button:submit", SUBMIT_RECT).with_label(SUBMIT_LABEL));
        }
        if self.mismatch {
            stage.feedback = Some(MISMATCH.to_string());
        }
    }

    pub fn cancel(&mut self) {
        self.drag.cancel();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
