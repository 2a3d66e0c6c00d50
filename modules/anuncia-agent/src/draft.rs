// Ad drafting: a pure transformation of product input plus research into
// title, attribute, description and FAQ suggestions. No I/O and no hidden
// state, so the whole stage is testable without network access.

use std::collections::{HashMap, HashSet};

use anuncia_common::{AdOutput, CompetitorInfo, FaqEntry, MarketResearchOutput, ProductInput};

/// How many related trends are turned into extra title candidates.
const MAX_TREND_TITLES: usize = 4;

/// How many trends feed the closing line of the description.
const MAX_DESCRIPTION_TRENDS: usize = 3;

/// Draft ad content from the product input and its market research.
/// Deterministic for fixed inputs.
pub fn draft_ad(input: &ProductInput, research: &MarketResearchOutput) -> AdOutput {
    let max_chars = research.category.max_title_length.max(1) as usize;
    let base = compose_base(input);

    let mut titles = vec![truncate_words(&base, max_chars)];
    for trend in related_trends(&research.trends, &base, MAX_TREND_TITLES) {
        titles.push(truncate_words(&extend_with_trend(&base, trend), max_chars));
    }
    let mut seen = HashSet::new();
    titles.retain(|t| !t.is_empty() && seen.insert(t.clone()));
    if titles.is_empty() {
        titles.push(truncate_words(&research.category.name, max_chars));
    }

    let mut suggested_attributes = HashMap::new();
    let mut missing_required = Vec::new();
    for (id, def) in &research.attribute_schema {
        let suggestion = own_value(input, id)
            .or_else(|| competitor_consensus(&research.competitor_analysis, id));
        match suggestion {
            Some(value) => {
                suggested_attributes.insert(id.clone(), value);
            }
            None if def.required => missing_required.push(id.clone()),
            None => {}
        }
    }
    missing_required.sort();

    AdOutput {
        suggested_titles: titles,
        suggested_attributes,
        missing_required_attributes: missing_required,
        suggested_description: draft_description(input, research, &base),
        suggested_faq: draft_faq(research),
    }
}

/// Join name, brand and model, skipping blanks and parts already present.
fn compose_base(input: &ProductInput) -> String {
    let mut base = String::new();
    for part in [
        input.name.as_str(),
        input.brand.as_str(),
        input.model.as_str(),
    ] {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if base.to_lowercase().contains(&part.to_lowercase()) {
            continue;
        }
        if !base.is_empty() {
            base.push(' ');
        }
        base.push_str(part);
    }
    base
}

/// Cut on a word boundary so no candidate exceeds the category limit.
/// Lengths are counted in characters, matching the marketplace rule.
fn truncate_words(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out = String::new();
    let mut out_chars = 0;
    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        let sep = if out.is_empty() { 0 } else { 1 };
        if out_chars + sep + word_chars > max_chars {
            break;
        }
        if sep == 1 {
            out.push(' ');
        }
        out.push_str(word);
        out_chars += sep + word_chars;
    }

    if out.is_empty() {
        // Single word longer than the whole limit.
        text.chars().take(max_chars).collect()
    } else {
        out
    }
}

/// Trends that share a word with the product, in upstream order.
fn related_trends<'a>(trends: &'a [String], base: &str, limit: usize) -> Vec<&'a str> {
    let base_words = keywords(base);
    trends
        .iter()
        .filter(|t| keywords(t).iter().any(|w| base_words.contains(w)))
        .take(limit)
        .map(|s| s.as_str())
        .collect()
}

fn keywords(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Append the trend words the base does not already contain.
fn extend_with_trend(base: &str, trend: &str) -> String {
    let base_words: HashSet<String> = base
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();
    let extra: Vec<&str> = trend
        .split_whitespace()
        .filter(|w| !base_words.contains(&w.to_lowercase()))
        .collect();
    if extra.is_empty() {
        base.to_string()
    } else {
        format!("{} {}", base, extra.join(" "))
    }
}

/// Suggest a value from the seller's own fields, keyed by the marketplace
/// attribute ids those fields map to.
fn own_value(input: &ProductInput, attr_id: &str) -> Option<String> {
    let value = match attr_id {
        "BRAND" => &input.brand,
        "MODEL" => &input.model,
        "EAN" | "GTIN" => &input.ean,
        _ => return None,
    };
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// The most common value for an attribute across competitors. Ties break
/// to the lexicographically smallest value so the output is stable.
fn competitor_consensus(competitors: &[CompetitorInfo], attr_id: &str) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for competitor in competitors {
        if let Some(value) = competitor.attributes.get(attr_id) {
            *counts.entry(value.as_str()).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(value, _)| value.to_string())
}

fn draft_description(input: &ProductInput, research: &MarketResearchOutput, base: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();

    let ean = input.ean.trim();
    if ean.is_empty() {
        paragraphs.push(base.to_string());
    } else {
        paragraphs.push(format!("{base} (EAN {ean})"));
    }

    if let Some(details) = input.details.as_deref() {
        let details = details.trim();
        if !details.is_empty() {
            paragraphs.push(details.to_string());
        }
    }

    let top: Vec<&str> = research
        .trends
        .iter()
        .take(MAX_DESCRIPTION_TRENDS)
        .map(|s| s.as_str())
        .collect();
    if !top.is_empty() {
        paragraphs.push(format!("Buscado na categoria como: {}.", top.join(", ")));
    }

    paragraphs.join("\n\n")
}

/// Fixed marketplace-convention entries plus a shipping answer derived
/// from what competitors in the category offer.
fn draft_faq(research: &MarketResearchOutput) -> Vec<FaqEntry> {
    let free_shipping = research
        .competitor_analysis
        .iter()
        .any(|c| c.free_shipping == Some(true));

    let shipping_answer = if free_shipping {
        "Sim, este anúncio oferece frete grátis via Mercado Envios."
    } else {
        "O frete é calculado no checkout de acordo com o CEP."
    };

    vec![
        FaqEntry {
            question: "O envio é grátis?".to_string(),
            answer: shipping_answer.to_string(),
        },
        FaqEntry {
            question: "O produto tem garantia?".to_string(),
            answer: "Sim, garantia do vendedor de 90 dias a partir do recebimento.".to_string(),
        },
        FaqEntry {
            question: "Acompanha nota fiscal?".to_string(),
            answer: "Sim, todos os pedidos são enviados com nota fiscal.".to_string(),
        },
    ]
}
