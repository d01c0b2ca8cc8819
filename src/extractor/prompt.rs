use serde_json::{Value, json};

use crate::extractor::models::MoodTags;

/// Jamendo tags the model is nudged towards. Guidance only, never enforced.
pub const ALLOWED_GENRES: &[&str] = &[
    "pop", "rock", "electronic", "hiphop", "jazz", "indie", "classical", "ambient", "chillout",
    "metal", "acoustic", "rnb",
];

pub const ALLOWED_MOODS: &[&str] = &[
    "happy", "sad", "chill", "energetic", "relax", "dark", "romantic", "uplifting", "calm",
    "heavy", "focus", "melancholic",
];

pub struct FewShotExample {
    pub text: &'static str,
    pub genres: &'static [&'static str],
    pub moods: &'static [&'static str],
    pub keywords: &'static [&'static str],
}

impl FewShotExample {
    pub fn tags(&self) -> MoodTags {
        MoodTags::new(
            self.genres.iter().copied(),
            self.moods.iter().copied(),
            self.keywords.iter().copied(),
        )
    }
}

pub const FEW_SHOT_EXAMPLES: &[FewShotExample] = &[
    FewShotExample {
        text: "I'm stressed about finals and need to focus",
        genres: &["chillout", "ambient"],
        moods: &["focus", "calm"],
        keywords: &["study", "concentration"],
    },
    FewShotExample {
        text: "Hitting the gym hard today, need something aggressive",
        genres: &["metal", "electronic"],
        moods: &["energetic", "heavy"],
        keywords: &["workout", "gym"],
    },
    FewShotExample {
        text: "Sitting by the window watching the rain",
        genres: &["jazz", "acoustic"],
        moods: &["melancholic", "chill"],
        keywords: &["rain", "cozy"],
    },
];

pub fn build_prompt(user_text: &str) -> String {
    let mut prompt = String::from(
        "Act as a professional music curator and semantic translator. Analyze the user's \
         natural language text (which may describe feelings, weather, activities, or vague \
         scenarios) and translate it into musical parameters: genres, moods, and keywords.\n\n",
    );

    prompt.push_str(
        "To keep catalog lookups valid, prefer these standard Jamendo tags where possible:\n",
    );
    prompt.push_str(&format!("- Allowed Genres: {}\n", ALLOWED_GENRES.join(", ")));
    prompt.push_str(&format!("- Allowed Moods: {}\n\n", ALLOWED_MOODS.join(", ")));

    prompt.push_str("Guidelines:\n");
    prompt.push_str("- Extract 1-2 relevant standard music genres.\n");
    prompt.push_str("- Extract 1-2 descriptive mood adjectives.\n");
    prompt.push_str(
        "- Extract 1-2 thematic keywords related to the activity or setting \
         (e.g. \"study\", \"rain\", \"workout\", \"party\", \"sleep\").\n\n",
    );

    prompt.push_str("Examples:\n");
    for example in FEW_SHOT_EXAMPLES {
        let output = json!({
            "genres": example.genres,
            "moods": example.moods,
            "keywords": example.keywords,
        });
        prompt.push_str(&format!("User Text: \"{}\"\nOutput: {}\n\n", example.text, output));
    }

    prompt.push_str(&format!("User Text: \"{}\"\n", user_text.trim()));
    prompt
}

/// Output schema in the Gemini `responseSchema` dialect.
pub fn response_schema() -> Value {
    let string_array = |description: &str| {
        json!({
            "type": "ARRAY",
            "description": description,
            "items": { "type": "STRING" },
        })
    };

    json!({
        "type": "OBJECT",
        "properties": {
            "genres": string_array("1-2 relevant music genres"),
            "moods": string_array("1-2 relevant music moods"),
            "keywords": string_array("1-2 relevant music keywords"),
        },
        "required": ["genres", "moods", "keywords"],
    })
}
