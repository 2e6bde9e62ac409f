use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::warn;

use crate::ai_provider::{ImagePayload, TextGenerator};
use crate::core::{Result, Symptom};

pub const PROMPT_FOR_SYMPTOMS: &str =
    "Please describe your symptoms so I can provide appropriate guidance.";

pub const XRAY_PROMPT: &str = "You are assisting a public health screening service. \
Describe any notable findings visible in this X-ray image in plain language, \
state how confident you are, and remind the user that only a licensed radiologist \
or physician can provide a diagnosis.";

pub const VOICE_TRANSCRIPT: &str =
    "I've been having a fever and cough since yesterday. My temperature is around 100°F.";

const FEVER_RESPONSES: &[&str] = &[
    "Based on your reported fever, I recommend monitoring your temperature and staying hydrated. If it persists above 101°F for more than 24 hours, please consult a healthcare provider.",
    "Fever can be a sign of infection. Rest is important, and over-the-counter fever reducers may help with discomfort. If accompanied by severe symptoms, seek medical care.",
];

const COUGH_RESPONSES: &[&str] = &[
    "For your cough, try drinking warm liquids and using honey (if over 1 year old). If it persists more than a week or is producing colored phlegm, please consult a healthcare provider.",
    "A persistent cough should be monitored. If you experience shortness of breath or the cough worsens suddenly, please seek medical attention.",
];

const BREATHING_RESPONSES: &[&str] = &[
    "Shortness of breath requires immediate medical attention, especially if sudden or severe. Please contact emergency services or go to the nearest emergency department.",
    "This symptom needs prompt medical evaluation. While waiting for care, try to remain calm and sit upright to help ease breathing.",
];

const DEFAULT_RESPONSES: &[&str] = &[
    "Based on the symptoms you've shared, I recommend monitoring your condition and ensuring you stay hydrated and rested. If symptoms persist or worsen, please consult with a healthcare provider.",
    "Thank you for reporting your symptoms. While I can provide general guidance, a healthcare professional can offer personalized medical advice for your specific situation.",
];

fn canned_responses(symptom_name: &str) -> &'static [&'static str] {
    match symptom_name {
        "Fever" => FEVER_RESPONSES,
        "Cough" => COUGH_RESPONSES,
        "Shortness of Breath" => BREATHING_RESPONSES,
        _ => DEFAULT_RESPONSES,
    }
}

/// Catalog symptoms whose name appears anywhere in `text`, ignoring case.
pub fn identify_symptoms(catalog: &[Symptom], text: &str) -> Vec<Symptom> {
    let haystack = text.to_lowercase();
    catalog
        .iter()
        .filter(|s| haystack.contains(&s.name.to_lowercase()))
        .cloned()
        .collect()
}

/// Local canned advice used when the model is unreachable.
///
/// A severe symptom always selects the first entry of its bucket; otherwise
/// a random entry for the first symptom is returned.
pub fn fallback_response<R: Rng>(symptoms: &[Symptom], rng: &mut R) -> &'static str {
    if symptoms.is_empty() {
        return PROMPT_FOR_SYMPTOMS;
    }

    if let Some(severe) = symptoms.iter().find(|s| s.is_severe()) {
        return canned_responses(&severe.name)[0];
    }

    let responses = canned_responses(&symptoms[0].name);
    responses[rng.gen_range(0..responses.len())]
}

pub fn build_prompt(text: &str, symptoms: &[Symptom]) -> String {
    let mut prompt = String::from(
        "You are a public health assistant for a community surveillance service. \
Give brief, practical guidance, flag anything that needs urgent care, \
and recommend seeing a healthcare provider when appropriate.\n\n",
    );
    prompt.push_str(&format!("User message: {}\n", text.trim()));

    if symptoms.is_empty() {
        prompt.push_str("Identified symptoms: none\n");
    } else {
        prompt.push_str("Identified symptoms:\n");
        for symptom in symptoms {
            prompt.push_str(&format!(
                "- {} (severity: {:?}, duration: {:?})\n",
                symptom.name, symptom.severity, symptom.duration
            ));
        }
    }
    prompt
}

/// Wraps a text generator with the local fallback table.
pub struct Advisor<G: TextGenerator> {
    generator: G,
    rng: StdRng,
}

impl<G: TextGenerator> Advisor<G> {
    pub fn new(generator: G) -> Self {
        Self::with_rng(generator, StdRng::from_entropy())
    }

    pub fn with_rng(generator: G, rng: StdRng) -> Self {
        Advisor { generator, rng }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Ask the model for advice. Never fails: errors fall back to canned text.
    pub async fn advise(&mut self, text: &str, symptoms: &[Symptom]) -> String {
        let prompt = build_prompt(text, symptoms);
        match self.generator.generate(&prompt).await {
            Ok(answer) if !answer.trim().is_empty() => answer,
            Ok(_) => {
                warn!("model returned empty advice, using fallback");
                fallback_response(symptoms, &mut self.rng).to_string()
            }
            Err(e) => {
                warn!(error = %e, "advice request failed, using fallback");
                fallback_response(symptoms, &mut self.rng).to_string()
            }
        }
    }

    /// Describe an uploaded X-ray. Failures are returned to the caller.
    pub async fn analyze_xray(&self, image: &ImagePayload) -> Result<String> {
        self.generator
            .analyze_image(XRAY_PROMPT, image)
            .await
            .map_err(|e| {
                warn!(error = %e, "x-ray analysis failed");
                e
            })
    }
}

/// Stand-in for speech capture: waits, then hands back a fixed transcript.
pub async fn simulate_voice_capture(delay: Duration) -> String {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    VOICE_TRANSCRIPT.to_string()
}
