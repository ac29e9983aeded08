//! The event catalog — the scripted day→event table, and event resolution.
//!
//! The table is read-only data compiled into the crate. Multiple events may
//! share a day; the engine takes the first entry not yet completed.

use crate::event::SimEvent;
use crate::state::SimulationState;
use crate::types::{Day, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Expense,
    Income,
    Social,
    Temptation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventOption {
    pub text: String,
    pub cost: Money,
    pub reward: Money,
    pub happiness_delta: i32,
    /// Shown after choosing — flavour only, no mechanical effect.
    pub consequence: String,
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEvent {
    pub day: Day,
    pub id: u32,
    pub title: String,
    pub description: String,
    pub kind: EventKind,
    pub options: Vec<EventOption>,
}

pub struct EventCatalog {
    events: Vec<DayEvent>,
}

impl EventCatalog {
    pub fn new(events: Vec<DayEvent>) -> Self {
        Self { events }
    }

    /// The first event scheduled for `day` not yet completed.
    pub fn first_pending(&self, day: Day, completed: &BTreeSet<u32>) -> Option<&DayEvent> {
        self.events
            .iter()
            .find(|e| e.day == day && !completed.contains(&e.id))
    }

    pub fn by_id(&self, id: u32) -> Option<&DayEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The month of scripted events the game ships with.
    pub fn builtin() -> Self {
        let mut events = Vec::new();

        events.push(DayEvent {
            day: 2,
            id: 1,
            title: "友人からの飲み会の誘い".into(),
            description: "仲の良い友人から今夜の飲み会に誘われた。".into(),
            kind: EventKind::Social,
            options: vec![
                opt("参加する", 5_000, 0, 10, "楽しい夜を過ごしたが、財布はだいぶ軽くなった。"),
                opt("今回は断る", 0, 0, -5, "少し寂しいが、出費はゼロで済んだ。"),
            ],
        });

        events.push(DayEvent {
            day: 3,
            id: 2,
            title: "スマホ料金プランの見直し案内".into(),
            description: "格安プランへの乗り換え案内が届いた。事務手数料がかかる。".into(),
            kind: EventKind::Expense,
            options: vec![
                opt("乗り換える", 3_000, 0, 0, "手数料は痛いが、来月からの固定費が下がる。"),
                opt("そのままにする", 0, 0, 0, "手間はないが、割高なプランが続く。"),
            ],
        });

        events.push(DayEvent {
            day: 4,
            id: 3,
            title: "水道料金の請求".into(),
            description: "今月の水道料金の請求が届いた。".into(),
            kind: EventKind::Expense,
            options: vec![opt("支払う", 4_000, 0, 0, "ライフラインは待ってくれない。")],
        });

        events.push(DayEvent {
            day: 6,
            id: 4,
            title: "フリマアプリで不用品が売れた".into(),
            description: "出品していた古いゲーム機に買い手がついた。".into(),
            kind: EventKind::Income,
            options: vec![
                opt("発送する", 0, 8_000, 3, "部屋も片付いて一石二鳥。"),
                opt("やっぱり手放さない", 0, 0, 0, "出品を取り下げた。"),
            ],
        });

        events.push(DayEvent {
            day: 8,
            id: 5,
            title: "コンビニの新作スイーツ".into(),
            description: "レジ横の新作スイーツが目に入ってしまった。".into(),
            kind: EventKind::Temptation,
            options: vec![
                opt("買う", 1_500, 0, 4, "小さな幸せ。ただし積もれば大きな出費。"),
                opt("我慢する", 0, 0, -2, "今日のところは財布のひもを締めた。"),
            ],
        });

        events.push(DayEvent {
            day: 9,
            id: 6,
            title: "電気料金の請求".into(),
            description: "今月の電気料金の請求が届いた。".into(),
            kind: EventKind::Expense,
            options: vec![opt("支払う", 6_000, 0, 0, "エアコンの使いすぎに心当たりがある。")],
        });

        events.push(DayEvent {
            day: 12,
            id: 7,
            title: "友人の結婚式の招待状".into(),
            description: "来週末の結婚式。ご祝儀の相場は3万円らしい。".into(),
            kind: EventKind::Social,
            options: vec![
                opt("ご祝儀を包んで出席", 30_000, 0, 8, "旧友との再会。晴れ姿を祝えてよかった。"),
                opt("欠席の返事を出す", 0, 0, -10, "電報だけ送った。少し後ろめたい。"),
            ],
        });

        events.push(DayEvent {
            day: 13,
            id: 8,
            title: "副業の原稿料が入金".into(),
            description: "先月書いたレビュー記事の原稿料が振り込まれた。".into(),
            kind: EventKind::Income,
            options: vec![opt("受け取る", 0, 15_000, 5, "こつこつ続けてきた甲斐があった。")],
        });

        events.push(DayEvent {
            day: 16,
            id: 9,
            title: "冷蔵庫が故障した".into(),
            description: "冷蔵庫がうんともすんとも言わなくなった。".into(),
            kind: EventKind::Expense,
            options: vec![
                opt("修理を頼む", 12_000, 0, 0, "直った。あと数年は頑張ってもらう。"),
                opt("新品に買い替える", 35_000, 0, 5, "省エネモデルで電気代も下がるはず。"),
                opt("保冷剤でしのぐ", 0, 0, -8, "夏場にこれはつらい。"),
            ],
        });

        events.push(DayEvent {
            day: 18,
            id: 10,
            title: "ポイント還元キャンペーン".into(),
            description: "よく使うスーパーのポイントが失効間近だと通知が来た。".into(),
            kind: EventKind::Income,
            options: vec![
                opt("手続きして使い切る", 0, 2_000, 1, "塵も積もれば山となる。"),
                opt("面倒なのでやらない", 0, 0, -1, "ポイントは静かに消えていった。"),
            ],
        });

        events.push(DayEvent {
            day: 22,
            id: 11,
            title: "同僚との急な飲み会".into(),
            description: "仕事帰り、同僚に飲みに誘われた。".into(),
            kind: EventKind::Social,
            options: vec![
                opt("参加する", 6_000, 0, 6, "愚痴を言い合ってすっきりした。"),
                opt("断って帰る", 0, 0, -3, "まっすぐ帰って自炊した。"),
            ],
        });

        events.push(DayEvent {
            day: 24,
            id: 12,
            title: "家賃の引き落とし".into(),
            description: "今月の家賃の引き落とし日。".into(),
            kind: EventKind::Expense,
            options: vec![opt("支払う", 55_000, 0, 0, "今月も屋根の下で眠れる。")],
        });

        events.push(DayEvent {
            day: 26,
            id: 13,
            title: "限定セールの福袋".into(),
            description: "通販サイトの数量限定福袋。残りわずかの表示が揺れている。".into(),
            kind: EventKind::Temptation,
            options: vec![
                opt("買ってしまう", 20_000, 0, 10, "開封の瞬間だけは最高だった。"),
                opt_badge(
                    "画面を閉じて我慢",
                    0,
                    0,
                    -3,
                    "「残りわずか」は来週も表示されている気がする。",
                    "節約の鉄人",
                ),
            ],
        });

        events.push(DayEvent {
            day: 29,
            id: 14,
            title: "月末の食料品まとめ買い".into(),
            description: "冷蔵庫が空になった。月末までの食料を買い出しに行く。".into(),
            kind: EventKind::Expense,
            options: vec![
                opt("まとめ買いする", 8_000, 0, 2, "これで月末まで安心。"),
                opt("最低限だけ買う", 3_000, 0, -2, "もやしが主役の数日になりそうだ。"),
            ],
        });

        Self::new(events)
    }
}

fn opt(text: &str, cost: Money, reward: Money, happiness_delta: i32, consequence: &str) -> EventOption {
    EventOption {
        text: text.into(),
        cost,
        reward,
        happiness_delta,
        consequence: consequence.into(),
        badge: None,
    }
}

fn opt_badge(
    text: &str,
    cost: Money,
    reward: Money,
    happiness_delta: i32,
    consequence: &str,
    badge: &str,
) -> EventOption {
    EventOption {
        badge: Some(badge.into()),
        ..opt(text, cost, reward, happiness_delta, consequence)
    }
}

/// Apply the chosen option: money, happiness, completion, optional badge.
pub fn resolve_event(
    state: &mut SimulationState,
    event: &DayEvent,
    option: &EventOption,
) -> Vec<SimEvent> {
    let money_delta = option.reward - option.cost;
    state.money += money_delta;
    state.adjust_happiness(option.happiness_delta);
    state.completed_event_ids.insert(event.id);

    let mut events = vec![SimEvent::EventResolved {
        event_id: event.id,
        money_delta,
        happiness_delta: option.happiness_delta,
    }];
    if let Some(badge) = &option.badge {
        // Appended without an existence check — duplicates are allowed here.
        state.award_badge(badge);
        events.push(SimEvent::BadgeEarned {
            badge: badge.clone(),
        });
    }
    events
}
