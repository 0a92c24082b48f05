//=========================================================================
// Quiz
//=========================================================================
//
// One question, five answers, one of them right. A wrong pick shakes the
// board and shows an error line; both go away when the pointer moves again.
//
//=========================================================================

use log::debug;

use super::{PuzzleStatus, Verdict};
use crate::core::geometry::Rect;
use crate::core::globals::GlobalContext;
use crate::core::scene::{Sprite, Stage};
use crate::game::actor::Walker;
use crate::game::room::RoomPuzzle;

//=== Content =============================================================

pub const QUESTION: &str = "Чему вас научила немецко-армянская налоговая одиссея?";

pub const ANSWERS: [&str; 5] = [
    "Провайдеры бывают глобальными, а ответственность нет",
    "В Finanzamt отвечают медленно, но зато верно",
    "Когда тебе отвечают \"мы это уточним\" — лучше начинай уточнять сам",
    "На лучшую налоговую консультацию к SVP R&D можно записаться через телеграм",
    "Все вышеперечисленное",
];

pub const CORRECT_ANSWER: usize = 4;

pub const WRONG_ANSWER: &str = "Эх, все же придется звонить KPMG!";

//=== Layout ==============================================================

const ANSWER_X: f32 = 360.0;
const ANSWER_WIDTH: f32 = 1200.0;
const ANSWER_HEIGHT: f32 = 100.0;
const FIRST_ANSWER_Y: f32 = 350.0;
const ANSWER_STEP: f32 = 130.0;

pub fn answer_rect(index: usize) -> Rect {
    Rect::new(
        ANSWER_X,
        FIRST_ANSWER_Y + index as f32 * ANSWER_STEP,
        ANSWER_WIDTH,
        ANSWER_HEIGHT,
    )
}

//=== Quiz ================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorLine {
    Hidden,
    /// Shown this frame; survives the motion of the click itself.
    Fresh,
    Shown,
}

pub struct Quiz {
    error: ErrorLine,
}

impl Quiz {
    pub fn answer(&mut self, index: usize) -> Verdict {
        let verdict = Verdict::from_bool(index == CORRECT_ANSWER);
        debug!("Quiz answer {} is {:?}", index, verdict);
        if verdict == Verdict::Wrong {
            self.error = ErrorLine::Fresh;
        }
        verdict
    }

    pub fn shows_error(&self) -> bool {
        self.error != ErrorLine::Hidden
    }
}

impl RoomPuzzle for Quiz {
    fn begin(_ctx: &mut GlobalContext) -> Self {
        Self { error: ErrorLine::Hidden }
    }

    fn update(&mut self, ctx: &mut GlobalContext, _walker: &mut Walker) -> PuzzleStatus {
        match self.error {
            ErrorLine::Fresh => self.error = ErrorLine::Shown,
            ErrorLine::Shown if ctx.input_state.pointer_moved() => self.error = ErrorLine::Hidden,
            _ => {}
        }

        let Some((x, y)) = ctx.input_state.pointer_pressed() else {
            return PuzzleStatus::Running;
        };
        match (0..ANSWERS.len()).find(|&i| answer_rect(i).contains(x, y)) {
            Some(index) if self.answer(index) == Verdict::Correct => PuzzleStatus::Solved,
            _ => PuzzleStatus::Running,
        }
    }

    fn render(&self, _ctx: &GlobalContext, stage: &mut Stage) {
        stage.hud.push(QUESTION.to_string());
        for (i, answer) in ANSWERS.iter().enumerate() {
            stage.push(Sprite::new(format!("answer:{}", i), answer_rect(i)).with_label(*answer));
        }
        if self.shows_error() {
            stage.feedback = Some(WRONG_ANSWER.to_string());
            stage.shake = true;
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
