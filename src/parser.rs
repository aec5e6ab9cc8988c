use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::model::*;

/// Parse a bank file: YAML frontmatter, `# Title`, preamble paragraphs,
/// then one `## N. Prompt` section per question with task-list options
/// (`[x]` marks the correct one) and an optional `> explain:` blockquote.
pub fn parse_bank(
    content: &str,
    source_file: &str,
    bank_hash: &str,
) -> Result<QuestionBank, ConstructionError> {
    let (frontmatter, body) = split_frontmatter(content)?;
    let fm: Frontmatter = serde_yaml::from_str(&frontmatter)
        .map_err(|e| ConstructionError::BadFrontmatter(e.to_string()))?;

    let (title, preamble, drafts) = parse_body(&body)?;
    let title = fm.title.clone().unwrap_or(title);

    QuestionBank::new(fm, title, preamble, drafts, source_file, bank_hash)
}

fn split_frontmatter(content: &str) -> Result<(String, String), ConstructionError> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("---") {
        return Err(ConstructionError::MissingFrontmatter);
    }

    let after_first = &trimmed[3..];
    let end_pos = after_first
        .find("\n---")
        .ok_or(ConstructionError::UnterminatedFrontmatter)?;

    let fm = after_first[..end_pos].trim().to_string();
    let body = after_first[end_pos + 4..].to_string();

    Ok((fm, body))
}

fn parse_body(
    body: &str,
) -> Result<(String, Vec<String>, Vec<QuestionDraft>), ConstructionError> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(body, opts);

    let mut title = String::new();
    let mut preamble: Vec<String> = Vec::new();
    let mut drafts: Vec<QuestionDraft> = Vec::new();

    let mut in_h1 = false;
    let mut in_h2 = false;
    let mut current_h2_text = String::new();
    let mut seen_h2 = false;

    let mut current_options: Vec<OptionDraft> = Vec::new();
    let mut current_body: Vec<String> = Vec::new();
    let mut current_explanation: Option<String> = None;

    let mut in_blockquote = false;
    let mut blockquote_text = String::new();
    let mut in_list_item = false;
    let mut list_item_text = String::new();
    let mut task_list_checked: Option<bool> = None;
    let mut in_paragraph = false;
    let mut paragraph_text = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => match level {
                pulldown_cmark::HeadingLevel::H1 => {
                    in_h1 = true;
                }
                pulldown_cmark::HeadingLevel::H2 => {
                    if seen_h2 {
                        drafts.push(finalize_question(
                            &current_h2_text,
                            &mut current_options,
                            &mut current_body,
                            &mut current_explanation,
                        )?);
                    }
                    in_h2 = true;
                    current_h2_text = String::new();
                    seen_h2 = true;
                }
                _ => {}
            },
            Event::End(TagEnd::Heading(level)) => match level {
                pulldown_cmark::HeadingLevel::H1 => {
                    in_h1 = false;
                }
                pulldown_cmark::HeadingLevel::H2 => {
                    in_h2 = false;
                }
                _ => {}
            },
            Event::Start(Tag::BlockQuote(_)) => {
                in_blockquote = true;
                blockquote_text = String::new();
            }
            Event::End(TagEnd::BlockQuote(_)) => {
                in_blockquote = false;
                let trimmed = blockquote_text.trim();
                if seen_h2 {
                    if let Some(rest) = trimmed.strip_prefix("explain:") {
                        current_explanation = Some(rest.trim().to_string());
                    }
                }
            }
            Event::Start(Tag::Item) => {
                in_list_item = true;
                list_item_text = String::new();
                task_list_checked = None;
            }
            Event::End(TagEnd::Item) => {
                in_list_item = false;
                if seen_h2 {
                    if let Some(checked) = task_list_checked {
                        let (key, text) = split_keyed_option(list_item_text.trim());
                        current_options.push(OptionDraft {
                            key,
                            text,
                            correct: checked,
                        });
                    }
                }
                task_list_checked = None;
            }
            Event::TaskListMarker(checked) => {
                task_list_checked = Some(checked);
            }
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                paragraph_text = String::new();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let text = paragraph_text.trim().to_string();
                if text.is_empty() {
                    continue;
                }
                if in_blockquote {
                    blockquote_text = text;
                } else if seen_h2 {
                    current_body.push(text);
                } else if !in_h1 {
                    preamble.push(text);
                }
            }
            Event::Text(text) => {
                if in_h1 {
                    title = text.to_string();
                } else if in_h2 {
                    current_h2_text.push_str(&text);
                } else if in_list_item {
                    list_item_text.push_str(&text);
                } else if in_blockquote && !in_paragraph {
                    blockquote_text.push_str(&text);
                } else if in_paragraph {
                    paragraph_text.push_str(&text);
                }
            }
            Event::Code(code) => {
                let c = format!("`{}`", code);
                if in_paragraph {
                    paragraph_text.push_str(&c);
                } else if in_list_item {
                    list_item_text.push_str(&c);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if in_paragraph {
                    paragraph_text.push(' ');
                } else if in_list_item {
                    list_item_text.push(' ');
                }
            }
            _ => {}
        }
    }

    if seen_h2 {
        drafts.push(finalize_question(
            &current_h2_text,
            &mut current_options,
            &mut current_body,
            &mut current_explanation,
        )?);
    }

    Ok((title, preamble, drafts))
}

fn finalize_question(
    h2_text: &str,
    options: &mut Vec<OptionDraft>,
    body: &mut Vec<String>,
    explanation: &mut Option<String>,
) -> Result<QuestionDraft, ConstructionError> {
    let (number, heading) = parse_h2_title(h2_text)?;

    let mut prompt = heading;
    for para in body.drain(..) {
        prompt.push('\n');
        prompt.push_str(&para);
    }

    Ok(QuestionDraft {
        number,
        prompt,
        options: std::mem::take(options),
        explanation: explanation.take(),
    })
}

fn parse_h2_title(text: &str) -> Result<(u32, String), ConstructionError> {
    let trimmed = text.trim();
    // Expected format: "12. Prompt text"
    let dot_pos = trimmed
        .find('.')
        .ok_or_else(|| ConstructionError::BadHeading(trimmed.to_string()))?;
    let number: u32 = trimmed[..dot_pos]
        .trim()
        .parse()
        .map_err(|_| ConstructionError::BadHeading(trimmed.to_string()))?;
    Ok((number, trimmed[dot_pos + 1..].trim().to_string()))
}

/// An option line leading with a letter, as in "B. text" or "B) text",
/// supplies its own key; anything else is bare and gets one synthesized.
fn split_keyed_option(text: &str) -> (Option<char>, String) {
    let mut chars = text.chars();
    let first = chars.next();
    let second = chars.next();
    let third = chars.next();
    if let (Some(letter), Some(sep), Some(' ')) = (first, second, third) {
        if letter.is_ascii_alphabetic() && (sep == '.' || sep == ')') {
            return (Some(letter), text[3..].trim().to_string());
        }
    }
    (None, text.to_string())
}
