use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::phase::CyclePhase;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DailyTip {
    pub title: &'static str,
    pub short: &'static str,
    pub full: &'static str,
    pub emoji: &'static str,
}

const fn tip(
    title: &'static str,
    short: &'static str,
    full: &'static str,
    emoji: &'static str,
) -> DailyTip {
    DailyTip {
        title,
        short,
        full,
        emoji,
    }
}

const MENSTRUAL: &[DailyTip] = &[
    tip(
        "Replenish iron",
        "Eat iron-rich foods like spinach and lentils.",
        "During menstruation you lose iron. Dark leafy greens, legumes, lean red meat and vitamin C help absorption.",
        "🥬",
    ),
    tip(
        "Stay hydrated",
        "Drink more water to reduce bloating and fatigue.",
        "Dehydration worsens cramps and tiredness. Aim for at least 2L of water a day; chamomile and ginger teas also help.",
        "💧",
    ),
    tip(
        "Rest well",
        "Prioritize rest while your body works hard.",
        "Dropping progesterone causes fatigue. Sleep 7-9 hours and take short naps if you can.",
        "😴",
    ),
    tip(
        "Apply warmth",
        "Use a hot water bottle to relieve cramps.",
        "Heat relaxes uterine muscles and improves circulation. 15-20 minutes on the belly can replace a mild painkiller.",
        "🔥",
    ),
    tip(
        "Walk gently",
        "A gentle walk can ease the pain.",
        "Light exercise releases endorphins. 15-20 minutes of walking outdoors already makes a difference.",
        "🚶‍♀️",
    ),
];

const FOLLICULAR: &[DailyTip] = &[
    tip(
        "Energy is rising",
        "Use the growing energy for new projects.",
        "Estrogen rises after menstruation, bringing energy, mental clarity and creativity.",
        "⚡",
    ),
    tip(
        "Train harder",
        "Your body responds better to exercise now.",
        "With rising estrogen your muscles recover faster, so this is a good time for intense workouts.",
        "💪",
    ),
    tip(
        "Plan and organize",
        "Mental focus peaks, so plan your week.",
        "The follicular phase brings clarity and motivation. Set goals and make strategic decisions.",
        "📋",
    ),
    tip(
        "Feed creativity",
        "Estrogen boosts creativity and learning.",
        "Memory and learning improve in this phase. Explore hobbies or learn something new.",
        "🎨",
    ),
];

const OVULATION: &[DailyTip] = &[
    tip(
        "Shine socially",
        "Your social energy is at its maximum.",
        "Peak estrogen makes you more communicative and confident. Schedule important conversations now.",
        "✨",
    ),
    tip(
        "High self-esteem",
        "Enjoy the natural glow.",
        "Skin glows and posture is more confident. Wear something that makes you feel powerful.",
        "💃",
    ),
    tip(
        "High fertility",
        "The most fertile days of the cycle.",
        "If trying to conceive, this is the moment. If not, reinforce contraception. The fertile window lasts about 6 days.",
        "🌟",
    ),
    tip(
        "Full communication",
        "Conversations flow better now.",
        "Peak estrogen improves verbal communication. Ideal for negotiations and presentations.",
        "💬",
    ),
];

const LUTEAL: &[DailyTip] = &[
    tip(
        "Self-care first",
        "Slow down and take care of yourself.",
        "Progesterone rises and the body asks for calm. Hot baths, reading and relaxing activities help balance mood.",
        "🧖‍♀️",
    ),
    tip(
        "Reduce caffeine",
        "Less coffee means less anxiety in this phase.",
        "Caffeine can intensify pre-menstrual anxiety. Switch to calming teas like chamomile or lavender.",
        "☕",
    ),
    tip(
        "Prioritize sleep",
        "Progesterone causes drowsiness, so respect it.",
        "Sleep earlier, avoid screens before bed and build a nightly wind-down ritual.",
        "🌙",
    ),
    tip(
        "Watch salt and sugar",
        "Avoid excess to reduce bloating and PMS.",
        "Sodium increases fluid retention and sugar can worsen mood swings. Prefer whole foods.",
        "🍎",
    ),
    tip(
        "Magnesium helps",
        "Magnesium reduces cramps and improves mood.",
        "Dark chocolate, bananas and nuts are rich in magnesium and help with PMS and irritability.",
        "🍫",
    ),
];

pub fn tips_for_phase(phase: CyclePhase) -> &'static [DailyTip] {
    match phase {
        CyclePhase::Menstrual => MENSTRUAL,
        CyclePhase::Follicular => FOLLICULAR,
        CyclePhase::Ovulation => OVULATION,
        CyclePhase::Luteal => LUTEAL,
    }
}

/// Tip of the day, rotating through the phase's list by day of year.
pub fn daily_tip(phase: CyclePhase, date: NaiveDate) -> &'static DailyTip {
    let tips = tips_for_phase(phase);
    &tips[date.ordinal() as usize % tips.len()]
}
