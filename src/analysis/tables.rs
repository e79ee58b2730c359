/// Word lists and canned text used by the heuristic analyzer
///
/// The vocabularies drive mood detection, the stop words filter keyword
/// extraction, and the per-mood tables supply suggestions and summaries
/// when no generative model is available.

use crate::domain::Mood;

/// Three alternative sets of four suggestions
pub type SuggestionSets = [[&'static str; 4]; 3];

pub const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "great", "wonderful", "amazing", "grateful", "love", "excited", "perfect",
    "awesome", "good", "better", "best", "fantastic", "brilliant", "excellent", "pleased",
    "delighted",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "sad", "stressed", "overwhelmed", "anxious", "worried", "tired", "frustrated", "angry",
    "difficult", "bad", "worse", "worst", "terrible", "awful", "depressed", "upset",
    "disappointed",
];

pub const CALM_WORDS: &[&str] = &[
    "peaceful", "calm", "relaxed", "content", "serene", "quiet", "meditative", "tranquil",
    "still", "centered", "balanced",
];

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does", "did", "will",
    "would", "could", "should", "may", "might", "must", "can", "i", "you", "he", "she", "it",
    "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its", "our", "their",
    "this", "that", "these", "those", "just", "very", "really", "quite", "so", "too", "also",
    "then", "now", "here", "there", "where", "when", "how", "what", "why", "who", "feel",
    "feeling", "think", "thinking", "today", "yesterday", "tomorrow",
];

pub const POSITIVE_MOODS: [Mood; 4] = [Mood::Happy, Mood::Excited, Mood::Grateful, Mood::Content];
pub const NEGATIVE_MOODS: [Mood; 4] = [Mood::Stressed, Mood::Anxious, Mood::Overwhelmed, Mood::Sad];
pub const NEUTRAL_MOODS: [Mood; 3] = [Mood::Thoughtful, Mood::Content, Mood::Calm];

/// How much the writer had to say, by word count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLength {
    Short,
    Medium,
    Long,
}

impl EntryLength {
    /// Short below 40 words, long above 120
    pub fn from_word_count(words: usize) -> Self {
        if words < 40 {
            EntryLength::Short
        } else if words > 120 {
            EntryLength::Long
        } else {
            EntryLength::Medium
        }
    }

    pub fn clauses(&self) -> &'static [&'static str; 3] {
        match self {
            EntryLength::Short => &SHORT_ENTRY_CLAUSES,
            EntryLength::Medium => &MEDIUM_ENTRY_CLAUSES,
            EntryLength::Long => &LONG_ENTRY_CLAUSES,
        }
    }
}

/// Suggestion sets for a mood (`Other` shares the thoughtful table)
pub fn suggestions_for(mood: Mood) -> &'static SuggestionSets {
    match mood {
        Mood::Happy => &HAPPY_SUGGESTIONS,
        Mood::Grateful => &GRATEFUL_SUGGESTIONS,
        Mood::Excited => &EXCITED_SUGGESTIONS,
        Mood::Content => &CONTENT_SUGGESTIONS,
        Mood::Stressed => &STRESSED_SUGGESTIONS,
        Mood::Anxious => &ANXIOUS_SUGGESTIONS,
        Mood::Sad => &SAD_SUGGESTIONS,
        Mood::Overwhelmed => &OVERWHELMED_SUGGESTIONS,
        Mood::Calm => &CALM_SUGGESTIONS,
        Mood::Thoughtful | Mood::Other => &THOUGHTFUL_SUGGESTIONS,
    }
}

/// Summary openers for a mood (`Other` shares the thoughtful table)
pub fn summaries_for(mood: Mood) -> &'static [&'static str; 4] {
    match mood {
        Mood::Happy => &HAPPY_SUMMARIES,
        Mood::Grateful => &GRATEFUL_SUMMARIES,
        Mood::Excited => &EXCITED_SUMMARIES,
        Mood::Content => &CONTENT_SUMMARIES,
        Mood::Stressed => &STRESSED_SUMMARIES,
        Mood::Anxious => &ANXIOUS_SUMMARIES,
        Mood::Sad => &SAD_SUMMARIES,
        Mood::Overwhelmed => &OVERWHELMED_SUMMARIES,
        Mood::Calm => &CALM_SUMMARIES,
        Mood::Thoughtful | Mood::Other => &THOUGHTFUL_SUMMARIES,
    }
}

// ── Suggestion tables ──────────────────────────────────────────────────

const HAPPY_SUGGESTIONS: SuggestionSets = [
    [
        "Keep up the positive energy by maintaining your current habits",
        "Share your joy with others to amplify the positive feelings",
        "Consider journaling about what specifically made you happy today",
        "Take a moment to appreciate this positive moment fully",
    ],
    [
        "Continue the activities that brought you this happiness",
        "Express gratitude for the positive experiences you're having",
        "Share your good mood with friends and family",
        "Document what worked well today for future reference",
    ],
    [
        "Maintain this positive momentum in your daily routine",
        "Consider what specific factors contributed to your happiness",
        "Practice savoring these positive emotions mindfully",
        "Use this energy to tackle important goals",
    ],
];

const GRATEFUL_SUGGESTIONS: SuggestionSets = [
    [
        "Continue practicing gratitude - it's clearly benefiting your well-being",
        "Consider writing thank-you notes to people who made a difference",
        "Try a gratitude meditation before bed",
        "Keep a gratitude jar for future reflection",
    ],
    [
        "Expand your gratitude practice to different areas of life",
        "Share your appreciation with others who have helped you",
        "Notice small daily blessings you might usually overlook",
        "Practice gratitude journaling consistently",
    ],
    [
        "Express thanks to someone who has impacted your life positively",
        "Create a gratitude ritual for your morning or evening",
        "Focus on being grateful for challenges that helped you grow",
        "Consider volunteer work to give back to your community",
    ],
];

const EXCITED_SUGGESTIONS: SuggestionSets = [
    [
        "Channel this excitement into productive action toward your goals",
        "Share your enthusiasm with supportive friends and family",
        "Use this energy to tackle challenging tasks",
        "Document what's exciting you for future motivation",
    ],
    [
        "Plan concrete steps to make the most of this exciting opportunity",
        "Balance excitement with realistic expectations and planning",
        "Use this momentum to push through any obstacles",
        "Consider how to sustain this positive energy long-term",
    ],
    [
        "Transform excitement into focused action and commitment",
        "Share your enthusiasm to inspire others around you",
        "Create a vision board or plan for what excites you",
        "Practice mindful excitement without getting overwhelmed",
    ],
];

const CONTENT_SUGGESTIONS: SuggestionSets = [
    [
        "Appreciate and maintain this sense of inner peace",
        "Notice what contributes to your feeling of contentment",
        "Use this stable emotional state to reflect on your goals",
        "Practice gratitude for this moment of satisfaction",
    ],
    [
        "Build on this foundation of contentment for future growth",
        "Share your peaceful energy with others who might need it",
        "Consider how to maintain this balance during challenging times",
        "Use this clarity to make important life decisions",
    ],
    [
        "Cultivate habits that support this sense of well-being",
        "Practice mindfulness to stay present with these good feelings",
        "Consider what life circumstances contribute to your contentment",
        "Document this positive state for future reference",
    ],
];

const STRESSED_SUGGESTIONS: SuggestionSets = [
    [
        "Take regular breaks throughout your day to prevent burnout",
        "Try deep breathing exercises: 4 counts in, hold for 4, out for 4",
        "Consider time-blocking to manage your workload better",
        "Schedule some dedicated self-care time this week",
    ],
    [
        "Practice progressive muscle relaxation to release physical tension",
        "Identify the specific sources of stress and address them systematically",
        "Consider delegating tasks or asking for help where possible",
        "Try a brief mindfulness meditation when feeling overwhelmed",
    ],
    [
        "Prioritize your tasks and focus on what's most important",
        "Create boundaries between work and personal time",
        "Consider talking to someone about what's stressing you",
        "Try gentle exercise like walking to reduce stress hormones",
    ],
];

const ANXIOUS_SUGGESTIONS: SuggestionSets = [
    [
        "Practice grounding techniques: name 5 things you can see, 4 you can hear, 3 you can touch",
        "Try progressive muscle relaxation to calm your nervous system",
        "Consider talking to someone you trust about your concerns",
        "Limit caffeine and practice gentle movement",
    ],
    [
        "Use box breathing (4-4-4-4) to activate your parasympathetic nervous system",
        "Challenge anxious thoughts with evidence-based thinking",
        "Consider what you can control vs. what you cannot",
        "Try journaling to externalize your worries",
    ],
    [
        "Practice mindfulness meditation to stay present",
        "Create a worry time - 15 minutes daily to process concerns",
        "Use positive self-talk to counter anxious thoughts",
        "Consider gentle yoga or stretching to ease physical tension",
    ],
];

const SAD_SUGGESTIONS: SuggestionSets = [
    [
        "Allow yourself to feel these emotions without judgment",
        "Reach out to a trusted friend or family member for support",
        "Consider gentle movement like a walk in nature",
        "Practice self-compassion and treat yourself kindly",
    ],
    [
        "Try creative expression like drawing, writing, or music",
        "Focus on basic self-care: nutrition, sleep, and hygiene",
        "Consider what small step might improve your mood",
        "Remember that this feeling is temporary and will pass",
    ],
    [
        "Connect with supportive people in your life",
        "Consider professional support if sadness persists",
        "Practice gratitude for small positive moments",
        "Engage in activities that usually bring you comfort",
    ],
];

const OVERWHELMED_SUGGESTIONS: SuggestionSets = [
    [
        "Break large tasks down into smaller, manageable steps",
        "Prioritize your to-do list and focus on the most important items",
        "Consider saying no to non-essential commitments",
        "Ask for help or delegate where possible",
    ],
    [
        "Create a simple daily routine to provide structure",
        "Practice the two-minute rule: if it takes less than 2 minutes, do it now",
        "Consider what you can eliminate or postpone",
        "Take breaks and practice deep breathing when feeling swamped",
    ],
    [
        "Focus on one task at a time instead of multitasking",
        "Create physical and mental boundaries around your time",
        "Consider using time-management tools or apps",
        "Remember that you don't have to do everything perfectly",
    ],
];

const CALM_SUGGESTIONS: SuggestionSets = [
    [
        "Maintain this peaceful state with regular meditation practice",
        "Spend time in nature to enhance your sense of calm",
        "Consider yoga or gentle stretching to support relaxation",
        "Use this clarity to reflect on your life direction",
    ],
    [
        "Practice mindful breathing to sustain this tranquil state",
        "Create a peaceful environment in your living space",
        "Consider what activities help you maintain inner peace",
        "Share this calming energy with others who might benefit",
    ],
    [
        "Develop a daily mindfulness practice to cultivate calm",
        "Notice and appreciate moments of stillness throughout your day",
        "Use this peaceful state to make thoughtful decisions",
        "Consider meditation or contemplative practices",
    ],
];

const THOUGHTFUL_SUGGESTIONS: SuggestionSets = [
    [
        "Your reflective nature is a strength - continue this self-awareness",
        "Consider exploring your thoughts through creative expression",
        "Try mindfulness meditation to deepen your insights",
        "Journal regularly to track your emotional and mental patterns",
    ],
    [
        "Use your thoughtfulness to gain clarity on important decisions",
        "Consider discussing your insights with trusted friends or mentors",
        "Practice balancing reflection with action",
        "Document your thoughts and insights for future reference",
    ],
    [
        "Channel your reflective energy into creative or intellectual pursuits",
        "Consider how your insights can benefit others",
        "Balance thinking with being present in the moment",
        "Use your self-awareness for personal growth and development",
    ],
];

// ── Summary templates ──────────────────────────────────────────────────

const HAPPY_SUMMARIES: [&str; 4] = [
    "A joyful and positive entry reflecting good emotional well-being and life satisfaction.",
    "An uplifting reflection showing optimism and positive emotional state.",
    "A cheerful entry indicating strong mental wellness and positive outlook.",
    "A delightful reflection demonstrating happiness and emotional balance.",
];

const GRATEFUL_SUMMARIES: [&str; 4] = [
    "An appreciative reflection showing strong emotional resilience and gratitude practice.",
    "A thankful entry demonstrating healthy emotional processing and appreciation.",
    "A grateful reflection indicating good emotional balance and mindfulness.",
    "A heartwarming entry expressing gratitude and positive perspective.",
];

const EXCITED_SUMMARIES: [&str; 4] = [
    "An energetic entry showing enthusiasm and positive anticipation.",
    "A vibrant reflection indicating high motivation and excitement about life.",
    "An animated entry reflecting strong engagement and passionate feelings.",
    "A dynamic reflection showing enthusiasm and forward-looking energy.",
];

const CONTENT_SUMMARIES: [&str; 4] = [
    "A peaceful entry showing satisfaction and emotional balance.",
    "A balanced reflection indicating stability and life contentment.",
    "A serene entry demonstrating inner peace and acceptance.",
    "A harmonious reflection showing satisfaction with current circumstances.",
];

const STRESSED_SUMMARIES: [&str; 4] = [
    "Work or life pressures are affecting your well-being. Focus needed on stress management.",
    "Signs of stress and overwhelm present. Consider implementing coping strategies.",
    "Tension and pressure evident in your thoughts. Self-care and stress relief recommended.",
    "Stress indicators in your writing suggest need for balance and support.",
];

const ANXIOUS_SUMMARIES: [&str; 4] = [
    "Anxiety is present in your thoughts. Consider implementing calming strategies.",
    "Worried thoughts and concerns are affecting your peace of mind.",
    "Nervous energy and apprehension detected. Grounding techniques may help.",
    "Anxious feelings evident. Consider mindfulness and relaxation practices.",
];

const SAD_SUMMARIES: [&str; 4] = [
    "Sadness and melancholy are present in your reflection. Support may be beneficial.",
    "Low mood detected in your entry. Gentle self-care and connection recommended.",
    "Feelings of sadness expressed. Consider reaching out for support if needed.",
    "Melancholy tone suggests need for compassion and possibly professional support.",
];

const OVERWHELMED_SUMMARIES: [&str; 4] = [
    "Feeling overwhelmed by life circumstances. Breaking tasks down may help.",
    "Sense of being overwhelmed present. Prioritization and support recommended.",
    "Too much on your plate right now. Consider delegating and simplifying.",
    "Overwhelm indicators suggest need for better time management and boundaries.",
];

const CALM_SUMMARIES: [&str; 4] = [
    "A peaceful and balanced state of mind reflected in your writing.",
    "Tranquil thoughts and emotional equilibrium evident in your entry.",
    "A centered reflection showing good emotional regulation and mindfulness.",
    "Calm and composed entry indicating inner peace and emotional stability.",
];

const THOUGHTFUL_SUMMARIES: [&str; 4] = [
    "A reflective entry showing good self-awareness and introspection.",
    "Deep thinking and self-reflection evident in your thoughtful writing.",
    "Contemplative mood with healthy self-examination and insight.",
    "Introspective entry demonstrating strong emotional intelligence and awareness.",
];

// ── Length clauses appended to summaries ───────────────────────────────

const SHORT_ENTRY_CLAUSES: [&str; 3] = [
    " Consider expanding on your thoughts in future entries for deeper insights.",
    " Brief but meaningful reflection - try elaborating more next time.",
    " Concise entry - deeper exploration might yield additional insights.",
];

const MEDIUM_ENTRY_CLAUSES: [&str; 3] = [
    " This entry shows a healthy level of self-reflection and awareness.",
    " Good balance of reflection with meaningful emotional expression.",
    " Solid level of self-examination and emotional processing evident.",
];

const LONG_ENTRY_CLAUSES: [&str; 3] = [
    " Your detailed reflection shows excellent self-awareness and emotional processing.",
    " Comprehensive and thoughtful analysis of your emotional state.",
    " Thorough reflection demonstrating strong commitment to self-understanding.",
];
