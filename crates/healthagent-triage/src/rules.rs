//! Static triage tables.
//!
//! [`EMERGENCY_SIGNS`] is not a row of [`TOPIC_RULES`]. It is checked
//! before the table is consulted at all.

/// Prefix of every response the service gives.
pub const DISCLAIMER: &str = "I'm an educational demo avatar, not a medical professional. \
I don't diagnose or provide personalized medical advice. \
If this is urgent or you have severe symptoms, seek local emergency care.";

/// Phrases that always escalate to [`EMERGENCY_RESPONSE`].
pub const EMERGENCY_SIGNS: &[&str] = &[
    "chest pain",
    "severe chest pain",
    "crushing chest pain",
    "trouble breathing",
    "shortness of breath",
    "blue lips",
    "confusion",
    "cannot wake",
    "unconscious",
    "stroke",
    "numb on one side",
    "worst headache of my life",
    "suicidal",
    "suicide",
    "bleeding won't stop",
    "cant breathe",
];

pub const EMERGENCY_RESPONSE: &str = "Your message mentions potentially urgent warning signs. \
Please call your local emergency number or go to the nearest emergency department now.";

pub const FALLBACK_RESPONSE: &str = "Tell me what general topic you want to know about \
(sleep, headaches, anxiety, cold/flu, vaccines, nutrition, exercise, etc.).";

pub const EMPTY_INPUT_RESPONSE: &str = "Please enter a short question or topic.";

/// One row of the topic table.
#[derive(Debug, Clone, Copy)]
pub struct TopicRule {
    pub topic: &'static str,
    /// Matches when the normalized text contains any of these.
    pub keywords: &'static [&'static str],
    /// Matches when the normalized text is exactly one of these.
    pub exact: &'static [&'static str],
    pub response: &'static str,
}

impl TopicRule {
    /// `text` must already be normalized.
    pub fn matches(&self, text: &str) -> bool {
        self.exact.iter().any(|e| *e == text) || self.keywords.iter().any(|k| text.contains(k))
    }
}

/// Topic rules in precedence order. First match wins.
pub const TOPIC_RULES: &[TopicRule] = &[
    TopicRule {
        topic: "cold_flu",
        keywords: &["fever", "cold", "cough", "sore throat", "flu", "runny nose", "congestion"],
        exact: &[],
        response: "For typical cold/flu: rest, fluids, and over-the-counter symptom relief can help. \
Red flags: trouble breathing, chest pain, confusion, dehydration, fever lasting more than 3–4 days, \
or symptoms that rapidly worsen — seek in-person care.",
    },
    TopicRule {
        topic: "allergy",
        keywords: &["allergy", "allergies", "hay fever", "pollen"],
        exact: &[],
        response: "Allergy relief often includes avoiding triggers, saline rinses, and antihistamines. \
If you develop wheezing or breathing problems, seek care promptly.",
    },
    TopicRule {
        topic: "gastro",
        keywords: &["stomach", "nausea", "vomit", "vomiting", "diarrhea", "gastro"],
        exact: &[],
        response: "For mild stomach bugs: hydrate with small, frequent sips; consider oral rehydration \
solutions. Seek care if there is blood, signs of dehydration, high fever, severe belly pain, \
or symptoms last more than 2–3 days.",
    },
    TopicRule {
        topic: "headache",
        keywords: &["headache", "migraine"],
        exact: &[],
        response: "Typical headaches improve with rest, hydration, and over-the-counter pain relief. \
Red flags: sudden severe or “worst ever” headache, head injury, fever with stiff neck, \
vision or speech problems, weakness, or confusion — seek urgent care.",
    },
    TopicRule {
        topic: "anxiety",
        keywords: &["anxiety", "panic", "worry", "stress"],
        exact: &[],
        response: "For anxiety: try slow breathing (in 4s, hold 4s, out 6–8s for a few minutes), \
brief movement, and limiting caffeine. If anxiety interferes with daily life, consider talking \
to a licensed therapist or your clinician.",
    },
    TopicRule {
        topic: "depression",
        keywords: &["depress", "low mood", "hopeless"],
        exact: &[],
        response: "Low mood can improve with routine, sunlight, movement, and social contact. \
For persistent symptoms or thoughts of self-harm, contact local crisis services or your clinician.",
    },
    TopicRule {
        topic: "sleep",
        keywords: &["sleep", "insomnia"],
        exact: &[],
        response: "Sleep tips: consistent schedule, dark/cool/quiet room, limit screens and heavy meals \
before bed, and keep caffeine earlier in the day. If snoring with pauses or daytime sleepiness, \
discuss with a clinician.",
    },
    TopicRule {
        topic: "nutrition",
        keywords: &["diet", "nutrition", "eat healthy", "weight", "obesity"],
        exact: &[],
        response: "A balanced plate (vegetables, lean protein, whole grains, healthy fats) and fewer \
ultra-processed foods can help. Small, steady changes beat extreme diets. For medical conditions, \
a registered dietitian can tailor a plan.",
    },
    TopicRule {
        topic: "exercise",
        keywords: &["exercise", "workout", "physical activity"],
        exact: &[],
        response: "Aim for about 150 minutes per week of moderate activity plus two days of strength \
training if you can. Start gently and increase gradually; any movement helps.",
    },
    TopicRule {
        topic: "vaccination",
        keywords: &["vaccine", "vaccination", "immunization"],
        exact: &[],
        response: "Vaccines reduce risk of severe illness. Recommended schedules depend on age, health, \
and local guidelines. Your clinician or public health site can provide the latest advice for your region.",
    },
    TopicRule {
        topic: "autism",
        keywords: &["autism", "asd", "spectrum"],
        exact: &[],
        response: "Autism involves differences in communication, social interaction, and sensory \
processing. Only trained professionals can diagnose it. If you have questions, I can share \
general information and resources.",
    },
    TopicRule {
        topic: "greeting",
        keywords: &["hello", "hi "],
        exact: &["hi", "hello", "hey"],
        response: "Hello! How are you feeling today? I can share general wellness information.",
    },
];
