/// Daily reminder mail content

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::UserProfile;
use crate::notifications::OutgoingMail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

const fn quote(text: &'static str, author: &'static str) -> Quote {
    Quote { text, author }
}

pub const QUOTES: [Quote; 20] = [
    quote("The journey of a thousand miles begins with a single step.", "Lao Tzu"),
    quote("Your mental health is just as important as your physical health.", "Unknown"),
    quote("Progress, not perfection, is the goal.", "Unknown"),
    quote("Healing takes time, and asking for help is a courageous step.", "Mariska Hargitay"),
    quote("You are stronger than you think and more resilient than you know.", "Unknown"),
    quote("Self-care is not selfish. You cannot serve from an empty vessel.", "Eleanor Brown"),
    quote("Mental health is not a destination, but a process.", "Noam Shpancer"),
    quote("It's okay to not be okay; it's not okay to stay that way.", "Unknown"),
    quote("You don't have to control your thoughts. You just have to stop letting them control you.", "Dan Millman"),
    quote("Taking care of yourself is productive.", "Unknown"),
    quote("Every moment is a fresh beginning.", "T.S. Eliot"),
    quote("The only way out is through.", "Robert Frost"),
    quote("What lies behind us and what lies before us are tiny matters compared to what lies within us.", "Ralph Waldo Emerson"),
    quote("You have been assigned this mountain to show others it can be moved.", "Mel Robbins"),
    quote("Your current situation is not your final destination.", "Unknown"),
    quote("Growth begins at the end of your comfort zone.", "Unknown"),
    quote("Be patient with yourself. Self-growth is tender; it's holy ground.", "Stephen Covey"),
    quote("The greatest weapon against stress is our ability to choose one thought over another.", "William James"),
    quote("You are not a drop in the ocean, but the entire ocean in each drop.", "Rumi"),
    quote("Mindfulness is the aware, balanced acceptance of the present experience.", "Sylvia Boorstein"),
];

/// Greeting pieces for the hour a reminder goes out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    pub greeting: &'static str,
    pub emoji: &'static str,
    pub time_message: &'static str,
}

pub fn time_of_day(hour: u32) -> TimeOfDay {
    match hour {
        5..=11 => TimeOfDay {
            greeting: "Good morning",
            emoji: "🌅",
            time_message: "Start your day with mindful reflection",
        },
        12..=16 => TimeOfDay {
            greeting: "Good afternoon",
            emoji: "☀️",
            time_message: "Take a moment to pause and reflect",
        },
        17..=20 => TimeOfDay {
            greeting: "Good evening",
            emoji: "🌆",
            time_message: "Wind down and reflect on your day",
        },
        _ => TimeOfDay {
            greeting: "Good evening",
            emoji: "🌙",
            time_message: "End your day with peaceful reflection",
        },
    }
}

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> Quote {
    QUOTES.choose(rng).copied().unwrap_or(QUOTES[0])
}

/// Build a reminder for `profile` at local `hour`, with one of several subjects
pub fn reminder_mail<R: Rng + ?Sized>(
    profile: &UserProfile,
    hour: u32,
    quote: &Quote,
    rng: &mut R,
) -> Option<OutgoingMail> {
    let to = profile.email.clone()?;
    let time = time_of_day(hour);
    let name = &profile.name;

    let subjects = [
        format!("{} {}, {}! Time to reflect", time.emoji, time.greeting, name),
        format!("🌟 Your daily journal awaits - How was your day, {}?", name),
        format!("📝 Journal Reminder: {}", time.time_message.to_lowercase()),
        format!("💭 Daily reflection time! What's on your mind, {}?", name),
        format!("🧠 {}, let's explore your thoughts today", name),
    ];
    let subject = subjects[rng.gen_range(0..subjects.len())].clone();

    Some(OutgoingMail {
        to,
        subject,
        body: format!(
            "{} {}! It's time for your daily reflection. Taking a few minutes to journal about your day can help you process emotions and track your mental wellness journey. Quote of the day: \"{}\" - {}",
            time.greeting, name, quote.text, quote.author
        ),
    })
}
