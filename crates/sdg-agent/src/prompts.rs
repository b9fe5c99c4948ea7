//! System prompt presets and the instruction templates sent with each
//! analysis request.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FULL_PROMPT: &str = include_str!("../prompts/sdg_full.txt");
const CONDENSED_PROMPT: &str = include_str!("../prompts/sdg_condensed.txt");

/// Built-in system prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPreset {
    /// Multi-paragraph brief listing the 17 goals.
    #[default]
    Full,
    /// One-line brief.
    Condensed,
}

impl PromptPreset {
    pub fn text(self) -> &'static str {
        match self {
            PromptPreset::Full => FULL_PROMPT.trim_end(),
            PromptPreset::Condensed => CONDENSED_PROMPT.trim_end(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PromptPreset::Full => "full",
            PromptPreset::Condensed => "condensed",
        }
    }
}

impl fmt::Display for PromptPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full" => Ok(PromptPreset::Full),
            "condensed" => Ok(PromptPreset::Condensed),
            other => Err(format!(
                "unknown prompt preset '{other}', expected full or condensed"
            )),
        }
    }
}

/// Alignment instruction; focused on one goal when `sdg_number` is given.
pub fn alignment_instruction(project_description: &str, sdg_number: Option<u8>) -> String {
    match sdg_number {
        Some(n) => format!(
            "Please analyze the following project for alignment with SDG {n}:\n\n\
             {project_description}\n\n\
             For SDG {n}:\n\
             1. Identify which specific targets the project addresses\n\
             2. Rate the alignment (strong, moderate, weak)\n\
             3. Suggest metrics that could be used to measure progress\n\
             4. Recommend improvements to strengthen SDG alignment\n\n\
             Provide a concise summary highlighting how the project contributes to SDG {n}."
        ),
        None => format!(
            "Please analyze the following project for alignment with the UN Sustainable Development Goals:\n\n\
             {project_description}\n\n\
             For each relevant SDG:\n\
             1. Identify which specific targets the project addresses\n\
             2. Rate the alignment (strong, moderate, weak)\n\
             3. Suggest metrics that could be used to measure progress\n\
             4. Recommend improvements to strengthen SDG alignment\n\n\
             Provide a concise summary at the end highlighting the primary SDGs addressed."
        ),
    }
}

pub fn indicators_instruction(project_description: &str) -> String {
    format!(
        "Based on the following project description, suggest appropriate SDG indicators \
         that could be used to measure progress and impact:\n\n\
         {project_description}\n\n\
         For each suggested indicator:\n\
         1. Identify the specific SDG and target it relates to\n\
         2. Explain why this indicator is appropriate for this project\n\
         3. Suggest practical data collection methods\n\
         4. Note any potential challenges in measurement"
    )
}

pub fn agencies_instruction(initiative_description: &str) -> String {
    format!(
        "Based on the following initiative, identify the most relevant UN agencies and \
         entities that could provide support, expertise, or partnership:\n\n\
         {initiative_description}\n\n\
         For each identified agency:\n\
         1. Explain their relevance to this initiative\n\
         2. Note their specific expertise or resources that would be valuable\n\
         3. Suggest potential mechanisms for engagement (e.g., technical assistance, funding, partnership)"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_prompt_lists_every_goal() {
        let text = PromptPreset::Full.text();
        assert!(text.starts_with("You are the UN Sustainable Development Goals (SDG) Agent"));
        for n in 1..=sdg_tools::GOAL_COUNT {
            let goal = sdg_tools::goal_name(n).unwrap();
            assert!(text.contains(&format!("{n}. {goal}")), "missing {goal}");
        }
    }

    #[test]
    fn condensed_prompt_is_one_line() {
        let text = PromptPreset::Condensed.text();
        assert!(!text.is_empty());
        assert!(!text.contains('\n'));
    }

    #[test]
    fn preset_parses_case_insensitively() {
        assert_eq!("Condensed".parse::<PromptPreset>(), Ok(PromptPreset::Condensed));
        assert_eq!(" full ".parse::<PromptPreset>(), Ok(PromptPreset::Full));
        assert!("short".parse::<PromptPreset>().is_err());
    }

    #[test]
    fn focused_alignment_names_the_goal() {
        let focused = alignment_instruction("Solar microgrids", Some(7));
        assert!(
            focused.starts_with("Please analyze the following project for alignment with SDG 7:")
        );
        assert!(focused.contains("\n\nSolar microgrids\n\n"));
        assert!(focused.ends_with("contributes to SDG 7."));

        let general = alignment_instruction("Solar microgrids", None);
        assert!(general.contains("For each relevant SDG:"));
        assert!(general.ends_with("primary SDGs addressed."));
    }

    #[test]
    fn instructions_embed_full_description() {
        let long = "w".repeat(300);
        assert!(indicators_instruction(&long).contains(&long));
        assert!(agencies_instruction(&long).contains(&long));
    }
}
