// src/domain/question.rs

/// A trivia question with a single accepted answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answer: String,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }

    /// Case-insensitive exact match, ignoring surrounding whitespace
    pub fn is_correct(&self, given: &str) -> bool {
        given.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

const BANK: &[(&str, &str)] = &[
    ("Which Pokémon is number 25 in the national Pokédex?", "Pikachu"),
    ("What type is Charmander?", "Fire"),
    ("What does Bulbasaur evolve into?", "Ivysaur"),
    ("Which item is used to catch Pokémon?", "Poké Ball"),
    ("Who is the professor in Pallet Town?", "Oak"),
    ("What type is Squirtle?", "Water"),
    ("Which Pokémon is known as the Psi Pokémon and teleports away?", "Abra"),
    ("What does Magikarp evolve into?", "Gyarados"),
    ("Which Pokémon sleeps and blocks the road to Celadon City?", "Snorlax"),
    ("Which legendary Pokémon is number 150?", "Mewtwo"),
    ("What is the final evolution of Charmander?", "Charizard"),
    ("Which stone evolves Pikachu into Raichu?", "Thunder Stone"),
    ("Who is the Pewter City gym leader?", "Brock"),
    ("Who is the Cerulean City gym leader?", "Misty"),
    ("What type is Gengar?", "Ghost"),
    ("Which team do Jessie and James belong to?", "Rocket"),
];

/// The fixed trivia bank the quiz gate draws from
pub fn question_bank() -> Vec<Question> {
    BANK.iter()
        .map(|(prompt, answer)| Question::new(*prompt, *answer))
        .collect()
}
