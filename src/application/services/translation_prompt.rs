use crate::domain::LanguagePair;

/// Builds the instruction sent to the translation model. The rules keep the
/// model from paraphrasing drug names, diagnoses, and anatomy, and from
/// wrapping the output in markup the frontend would have to strip.
pub fn build_translation_instruction(languages: &LanguagePair, text: &str) -> String {
    format!(
        "You are a professional medical translator.\n\
         \n\
         Translate the following text from {src} to {tgt}.\n\
         \n\
         STRICT RULES:\n\
         - Preserve all medical terms exactly (drug names, diagnoses, anatomy)\n\
         - Do NOT add explanations unless necessary\n\
         - Output ONLY the translated sentence\n\
         - No markdown, no bullet points, no quotes\n\
         \n\
         Text:\n\
         {text}",
        src = languages.source,
        tgt = languages.target,
        text = text,
    )
}
