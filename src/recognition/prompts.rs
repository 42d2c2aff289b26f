/// Instruction sent to the vision model alongside each image
pub const VISION_INSTRUCTION: &str = r#"Please extract the names and their corresponding company names from the image. Each name is followed by the company name. Ignore any miscellaneous text such as "Attendee List", "sessions", etc. Ensure that each extracted pair is in the format "Name, Company"."#;

/// Build the user message: instruction followed by the inline image
pub fn build_vision_prompt(image_b64: &str) -> String {
    format!(
        "{} <img src=\"data:image/jpg;base64,{}\" />",
        VISION_INSTRUCTION, image_b64
    )
}
