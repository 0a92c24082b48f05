//=========================================================================
// Document Sort
//=========================================================================
//
// Ten orders, two bins. Each order is dragged into "reject" or
// "approve"; a correct drop files it, a wrong one leaves it in the pile,
// shakes the board and shows an error line for three seconds.
//
// Layout (stage units):
//   pile:  two columns at x = 360 / 1000, rows from y = 200 every 110
//   bins:  560×160 at y = 800, under each column
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::Duration;

//=== External Crates =====================================================

use log::debug;
use rand::seq::SliceRandom;

//=== Internal Dependencies ===============================================

use super::{PuzzleStatus, Verdict};
use crate::core::geometry::Rect;
use crate::core::globals::GlobalContext;
use crate::core::input::{Drag, DragEvent, DragInput, DropSurface};
use crate::core::scene::{Sprite, Stage};
use crate::core::timer::{TimerId, Timers};
use crate::game::actor::Walker;
use crate::game::room::RoomPuzzle;

//=== Content =============================================================

pub const TITLE: &str = "НА ПОДПИСЬ";
pub const WRONG_BIN: &str = "Что на это скажет Марк?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bin {
    Reject,
    Approve,
}

impl Bin {
    pub const ALL: [Bin; 2] = [Self::Reject, Self::Approve];

    pub fn label(self) -> &'static str {
        match self {
            Self::Reject => "ОТКЛОНИТЬ",
            Self::Approve => "УТВЕРДИТЬ",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Self::Reject => "bin:reject",
            Self::Approve => "bin:approve",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub text: &'static str,
    pub bin: Bin,
}

const fn doc(text: &'static str, bin: Bin) -> Document {
    Document { text, bin }
}

pub static DOCUMENTS: [Document; 10] = [
    doc("Дресс-код для всех работников в любое время года - только черный костюм", Bin::Reject),
    doc(
        "Объявление выговора работникам, не употреблявшим коньяк Арарат на последнем корпоративе",
        Bin::Reject,
    ),
    doc(
        "Ձայնագրություն Երևանի աշխատակիցներին շտապաբար վերադարձնելու մասին Պետերբուրգ։",
        Bin::Reject,
    ),
    doc("Приказ об окончании COVID в связи со срочным переездом", Bin::Reject),
    doc("Приказ об ОБЯЗАТЕЛЬНОМ использовании eMM в работе всех департаментов", Bin::Reject),
    doc("Приказ о принятии политики использования софта в компании", Bin::Approve),
    doc("Приказ об установлении режима конфиденциальности в компании", Bin::Approve),
    doc(
        "Приказ о предоставлении сотрудникам дополнительного выходного дня в течение года",
        Bin::Approve,
    ),
    doc("Приказ о порядке проведения корпоративных мероприятий", Bin::Approve),
    doc("Приказ о порядке утилизации мусора на территории компании", Bin::Approve),
];

//=== Layout ==============================================================

const CARD_WIDTH: f32 = 560.0;
const CARD_HEIGHT: f32 = 90.0;
const COLUMNS: [f32; 2] = [360.0, 1000.0];
const FIRST_ROW: f32 = 200.0;
const ROW_STEP: f32 = 110.0;
const BIN_Y: f32 = 800.0;
const BIN_HEIGHT: f32 = 160.0;

const ERROR_DURATION: Duration = Duration::from_millis(3000);
const SHAKE_DURATION: Duration = Duration::from_millis(500);

/// Pile slot of the card at `index`.
fn card_rect(index: usize) -> Rect {
    Rect::new(
        COLUMNS[index % 2],
        FIRST_ROW + (index / 2) as f32 * ROW_STEP,
        CARD_WIDTH,
        CARD_HEIGHT,
    )
}

pub fn bin_rect(bin: Bin) -> Rect {
    let x = match bin {
        Bin::Reject => COLUMNS[0],
        Bin::Approve => COLUMNS[1],
    };
    Rect::new(x, BIN_Y, CARD_WIDTH, BIN_HEIGHT)
}

//=== Board ===============================================================

#[derive(Debug, Clone)]
struct Card {
    document: Document,
    filed: bool,
}

/// The pile plus the bins, as a drop surface.
#[derive(Debug, Clone)]
struct Board {
    cards: Vec<Card>,
}

impl Board {
    fn filed(&self) -> usize {
        self.cards.iter().filter(|c| c.filed).count()
    }

    /// Files the card if `bin` is right for it.
    fn drop_into(&mut self, index: usize, bin: Bin) -> Verdict {
        let Some(card) = self.cards.get_mut(index) else {
            return Verdict::Wrong;
        };
        let verdict = Verdict::from_bool(!card.filed && card.document.bin == bin);
        if verdict == Verdict::Correct {
            card.filed = true;
        }
        verdict
    }
}

impl DropSurface for Board {
    type Item = usize;
    type Target = Bin;

    fn item_at(&self, x: f32, y: f32) -> Option<usize> {
        self.cards
            .iter()
            .enumerate()
            .find(|(i, card)| !card.filed && card_rect(*i).contains(x, y))
            .map(|(i, _)| i)
    }

    fn target_at(&self, x: f32, y: f32) -> Option<Bin> {
        Bin::ALL.into_iter().find(|&bin| bin_rect(bin).contains(x, y))
    }
}

//=== DocumentSort ========================================================

enum SortEvent {
    HideError,
    StopShake,
}

pub struct DocumentSort {
    board: Board,
    drag: Drag<usize>,
    error: Option<TimerId>,
    shake: Option<TimerId>,
    timers: Timers<SortEvent>,
}

impl DocumentSort {
    pub fn filed(&self) -> usize {
        self.board.filed()
    }

    pub fn is_done(&self) -> bool {
        self.filed() == self.board.cards.len()
    }

    /// Where the card showing `text` sits in the pile.
    pub fn card_slot(&self, text: &str) -> Option<Rect> {
        self.board
            .cards
            .iter()
            .position(|c| c.document.text == text)
            .map(card_rect)
    }

    fn reject_drop(&mut self) {
        for id in [self.error.take(), self.shake.take()].into_iter().flatten() {
            self.timers.cancel(id);
        }
        self.error = Some(self.timers.schedule(ERROR_DURATION, SortEvent::HideError));
        self.shake = Some(self.timers.schedule(SHAKE_DURATION, SortEvent::StopShake));
    }
}

impl RoomPuzzle for DocumentSort {
    fn begin(ctx: &mut GlobalContext) -> Self {
        let mut cards: Vec<Card> = DOCUMENTS
            .iter()
            .map(|&document| Card { document, filed: false })
            .collect();
        cards.shuffle(&mut ctx.rng);

        Self {
            board: Board { cards },
            drag: Drag::for_device(ctx.is_touch_device()),
            error: None,
            shake: None,
            timers: Timers::new(),
        }
    }

    fn update(&mut self, ctx: &mut GlobalContext, _walker: &mut Walker) -> PuzzleStatus {
        for event in self.timers.advance(ctx.clock.delta) {
            match event {
                SortEvent::HideError => self.error = None,
                SortEvent::StopShake => self.shake = None,
            }
        }

        if self.is_done() {
            return PuzzleStatus::Solved;
        }

        if let Some(DragEvent::Dropped { item, target }) = self.drag.poll(&ctx.input_state, &self.board) {
            match self.board.drop_into(item, target) {
                Verdict::Correct => {
                    debug!("Order filed under {:?} ({}/{})", target, self.filed(), DOCUMENTS.len());
                    if self.is_done() {
                        return PuzzleStatus::Solved;
                    }
                }
                Verdict::Wrong => self.reject_drop(),
            }
        }

        PuzzleStatus::Running
    }

    fn render(&self, ctx: &GlobalContext, stage: &mut Stage) {
        stage.hud.push(TITLE.to_string());
        stage.hud.push(format!("{} / {}", self.filed(), DOCUMENTS.len()));

        for bin in Bin::ALL {
            stage.push(Sprite::new(bin.key(), bin_rect(bin)).with_label(bin.label()));
        }

        let held = self.drag.held();
        for (i, card) in self.board.cards.iter().enumerate() {
            if card.filed {
                continue;
            }
            let mut rect = card_rect(i);
            if held == Some(i) {
                if let Some((x, y)) = self.drag.position(&ctx.input_state) {
                    rect = rect.moved_to(x - rect.width / 2.0, y - rect.height / 2.0);
                }
            }
            stage.push(
                Sprite::new(format!("card:{}", i), rect)
                    .with_label(card.document.text)
                    .highlighted(held == Some(i)),
            );
        }

        if self.error.is_some() {
            stage.feedback = Some(WRONG_BIN.to_string());
        }
        stage.shake = self.shake.is_some();
    }

    fn cleanup(&mut self, _ctx: &mut GlobalContext) {
        self.drag.cancel();
        self.timers.cancel_all();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
