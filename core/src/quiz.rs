//! The quiz subsystem — weekly knowledge checks with non-repeating
//! random question selection.
//!
//! Selection draws uniformly from questions not in the recent-history
//! FIFO; once every question has been asked it falls back to the full
//! bank. The quiz window closes on any answer, right or wrong.

use crate::config::SimConfig;
use crate::event::SimEvent;
use crate::rng::SessionRng;
use crate::state::SimulationState;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

pub struct QuizBank {
    questions: Vec<QuizQuestion>,
}

impl QuizBank {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    pub fn by_id(&self, id: u32) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Draw a question not served recently, falling back to the full bank
    /// once every question has been asked. Records the draw in the history.
    pub fn draw(
        &self,
        state: &mut SimulationState,
        rng: &mut SessionRng,
        history_cap: usize,
    ) -> &QuizQuestion {
        assert!(!self.questions.is_empty(), "quiz bank is empty");

        let fresh: Vec<&QuizQuestion> = self
            .questions
            .iter()
            .filter(|q| !state.asked_question_history.contains(&q.id))
            .collect();

        let chosen = if fresh.is_empty() {
            let index = rng.next_u64_below(self.questions.len() as u64) as usize;
            &self.questions[index]
        } else {
            let index = rng.next_u64_below(fresh.len() as u64) as usize;
            fresh[index]
        };

        state.remember_question(chosen.id, history_cap);
        chosen
    }

    /// The financial-literacy questions the game ships with.
    pub fn builtin() -> Self {
        let questions = vec![
            question(
                1,
                "年利15%で10万円を1年間借りた場合、利息はいくら？",
                &["5,000円", "15,000円", "1,500円", "50,000円"],
                1,
                "利息は元金×年利で計算する。10万円×0.15＝15,000円。",
            ),
            question(
                2,
                "「複利」の説明として正しいものは？",
                &[
                    "利息が元金に組み入れられ、利息にも利息が付く",
                    "毎回同じ額の利息が付く",
                    "利息が途中で免除される",
                ],
                0,
                "複利では利息が元金に繰り入れられるため、残高は雪だるま式に増えていく。",
            ),
            question(
                3,
                "リボ払いで最も注意すべき点は？",
                &[
                    "月々の支払額が一定で、残高がなかなか減らない",
                    "手数料が一切かからない",
                    "一括払いより総支払額が安くなる",
                ],
                0,
                "毎月の支払いが一定でも手数料は残高に掛かり続けるため、完済が遠のきやすい。",
            ),
            question(
                4,
                "家計の「固定費」にあたるものは？",
                &["外食費", "洋服代", "家賃"],
                2,
                "毎月ほぼ一定額かかる支出が固定費。見直し効果が長く続くのも固定費。",
            ),
            question(
                5,
                "急な出費に備える予備資金の目安は、生活費の何か月分？",
                &["1週間分", "3〜6か月分", "10年分"],
                1,
                "病気や失業に備え、生活費の3〜6か月分を目安に確保しておくとよい。",
            ),
            question(
                6,
                "法律の上限を大きく超える金利で貸し付ける業者を何と呼ぶ？",
                &["ヤミ金融", "信用金庫", "労働金庫"],
                0,
                "法外な金利で貸すヤミ金融には絶対に近づかないこと。",
            ),
            question(
                7,
                "給与明細の「手取り」とは？",
                &[
                    "支給総額そのもの",
                    "税金や社会保険料を差し引いた後の金額",
                    "残業代だけの金額",
                ],
                1,
                "家計の計画は支給総額ではなく手取りを基準に立てる。",
            ),
            question(
                8,
                "借金の返済を延滞し続けるとどうなる？",
                &[
                    "信用情報に記録が残り、新たな借入が難しくなる",
                    "特に何も起こらない",
                    "金利が自動的に下がる",
                ],
                0,
                "延滞は信用情報機関に記録され、カードやローンの審査に長く影響する。",
            ),
        ];
        Self::new(questions)
    }
}

fn question(
    id: u32,
    text: &str,
    options: &[&str],
    correct_index: usize,
    explanation: &str,
) -> QuizQuestion {
    QuizQuestion {
        id,
        question: text.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
        explanation: explanation.into(),
    }
}

/// Apply an answer. The quiz window closes regardless of correctness; a
/// correct answer earns the fixed bonus.
pub fn resolve_quiz(
    state: &mut SimulationState,
    question: &QuizQuestion,
    selected_index: usize,
    config: &SimConfig,
) -> Vec<SimEvent> {
    state.weekly_quiz_completed = true;
    let correct = selected_index == question.correct_index;
    let bonus = if correct { config.quiz_bonus } else { 0 };
    state.money += bonus;
    vec![SimEvent::QuizAnswered {
        question_id: question.id,
        correct,
        bonus,
    }]
}
