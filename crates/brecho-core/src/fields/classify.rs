use crate::fields::FieldValue;
use crate::models::{FieldCategory, FieldKind};

/// Strings longer than this render as multiline text.
pub const LONG_TEXT_THRESHOLD: usize = 100;

/// Keyword table checked top to bottom; the first category with a matching
/// keyword wins. Reordering rows reclassifies stored data.
pub const CATEGORY_KEYWORDS: &[(FieldCategory, &[&str])] = &[
    (
        FieldCategory::Basic,
        &["nome", "marca", "categoria", "condicao", "genero", "modelo"],
    ),
    (
        FieldCategory::Physical,
        &[
            "tamanho",
            "cor",
            "tecido",
            "material",
            "medida",
            "peso",
            "estampa",
            "manga",
            "gola",
            "comprimento",
        ],
    ),
    (
        FieldCategory::Commercial,
        &["preco", "valor", "custo", "margem", "comissao", "desconto"],
    ),
    (
        FieldCategory::Content,
        &["descricao", "titulo", "tag", "observac", "relatorio", "detalhe"],
    ),
];

const LONG_TEXT_MARKERS: &[&str] = &[
    "descricao",
    "description",
    "relatorio",
    "report",
    "observac",
];

pub const CATEGORY_OPTIONS: &[&str] = &[
    "Blusa",
    "Camisa",
    "Camiseta",
    "Calça",
    "Saia",
    "Vestido",
    "Shorts",
    "Casaco",
    "Jaqueta",
    "Macacão",
    "Bolsa",
    "Calçado",
    "Acessório",
    "Outro",
];
pub const CONDITION_OPTIONS: &[&str] = &["A", "B", "C", "D"];
pub const GENDER_OPTIONS: &[&str] = &["Feminino", "Masculino", "Unissex", "Infantil"];
pub const SIZE_OPTIONS: &[&str] = &["PP", "P", "M", "G", "GG", "XG", "U"];

const SELECT_ENUMERATIONS: &[(&[&str], &[&str])] = &[
    (&["categoria", "category"], CATEGORY_OPTIONS),
    (&["condicao", "condition"], CONDITION_OPTIONS),
    (&["genero", "gender"], GENDER_OPTIONS),
    (&["tamanho", "size"], SIZE_OPTIONS),
];

/// Maps the accented letters used in Portuguese onto ASCII.
#[must_use]
pub fn fold_diacritics(value: &str) -> String {
    value
        .chars()
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ç' => 'c',
            'Ç' => 'C',
            'ñ' => 'n',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Normalizes a raw attribute name into a field key: accents folded,
/// camelCase split, lowercased, separators collapsed into `_`.
///
/// `"Condição"` becomes `condicao`, `"precoMin"` becomes `preco_min` and
/// `"Estilo Boho"` becomes `estilo_boho`.
#[must_use]
pub fn normalize_key(raw: &str) -> String {
    let folded = fold_diacritics(raw.trim());
    let mut out = String::with_capacity(folded.len());
    let mut prev_lower = false;
    let mut pending_sep = false;
    for ch in folded.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower {
                pending_sep = true;
            }
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            prev_lower = ch.is_lowercase() || ch.is_numeric();
            out.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
            prev_lower = false;
        }
    }
    out
}

/// Separator-free lowercase form used for keyword matching, so that
/// `Preco_Minimo`, `precoMinimo` and `preco minimo` all match alike.
#[must_use]
pub fn compact_key(key: &str) -> String {
    fold_diacritics(key)
        .chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[must_use]
pub fn display_name(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn infer_category(key: &str) -> FieldCategory {
    let compact = compact_key(key);
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| compact.contains(keyword)))
        .map_or(FieldCategory::Dynamic, |(category, _)| *category)
}

/// Fixed option list when the key names one of the known enumerations.
#[must_use]
pub fn select_options(key: &str) -> Option<&'static [&'static str]> {
    let compact = compact_key(key);
    SELECT_ENUMERATIONS
        .iter()
        .find(|(names, _)| names.contains(&compact.as_str()))
        .map(|(_, options)| *options)
}

#[must_use]
pub fn is_long_text_key(key: &str) -> bool {
    let compact = compact_key(key);
    LONG_TEXT_MARKERS
        .iter()
        .any(|marker| compact.contains(marker))
}

#[must_use]
pub fn infer_kind(key: &str, value: &FieldValue) -> FieldKind {
    match value {
        FieldValue::Boolean(_) => FieldKind::Boolean,
        FieldValue::Number(_) => FieldKind::Number,
        FieldValue::Text(text) => {
            if select_options(key).is_some() {
                FieldKind::Select
            } else if text.chars().count() > LONG_TEXT_THRESHOLD || is_long_text_key(key) {
                FieldKind::Multiline
            } else {
                FieldKind::Text
            }
        }
    }
}
