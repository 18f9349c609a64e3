//! Identifier inflection and naming helpers
//!
//! Provides:
//! - English pluralization/singularization of the last word of an identifier
//! - Go-style identifier casing with common initialisms (ID, URL, JSON, ...)
//! - Shortening of package-qualified type references
//!
//! Inflection works word-wise: the identifier is split into words, the last
//! word is inflected and the result is re-cased. A lowercase first character
//! in the input stays lowercase in the output.

use std::collections::{HashMap, HashSet};

use heck::ToSnakeCase;
use once_cell::sync::Lazy;

/// Words kept fully upper-case when casing identifiers
static INITIALISMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ACL", "API", "ASCII", "CPU", "CSS", "DNS", "EOF", "GUID", "HTML", "HTTP", "HTTPS", "ID",
        "IP", "JSON", "LHS", "QPS", "RAM", "RHS", "RPC", "SLA", "SMTP", "SQL", "SSH", "TCP", "TLS",
        "TTL", "UDP", "UI", "UID", "UUID", "URI", "URL", "UTF8", "VM", "XML", "XMPP", "XSRF", "XSS",
    ]
    .into_iter()
    .collect()
});

/// Words with no distinct plural form
static UNCOUNTABLE: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "data", "metadata", "equipment", "information", "rice", "money", "species", "series",
        "fish", "sheep", "deer", "jeans", "police", "news", "feedback", "media",
    ]
    .into_iter()
    .collect()
});

/// Irregular singular -> plural pairs
static IRREGULAR: Lazy<Vec<(&'static str, &'static str)>> = Lazy::new(|| {
    vec![
        ("person", "people"),
        ("man", "men"),
        ("woman", "women"),
        ("child", "children"),
        ("sex", "sexes"),
        ("move", "moves"),
        ("movie", "movies"),
        ("cookie", "cookies"),
        ("zombie", "zombies"),
        ("goose", "geese"),
        ("foot", "feet"),
        ("tooth", "teeth"),
        ("mouse", "mice"),
        ("louse", "lice"),
        ("ox", "oxen"),
        ("quiz", "quizzes"),
        ("axis", "axes"),
        ("crisis", "crises"),
        ("criterion", "criteria"),
        ("datum", "data"),
        ("matrix", "matrices"),
        ("vertex", "vertices"),
        ("index", "indices"),
        ("octopus", "octopi"),
        ("cactus", "cacti"),
        ("fungus", "fungi"),
        ("nucleus", "nuclei"),
        ("stimulus", "stimuli"),
        ("syllabus", "syllabi"),
        ("half", "halves"),
        ("wolf", "wolves"),
        ("shelf", "shelves"),
        ("self", "selves"),
        ("elf", "elves"),
        ("calf", "calves"),
        ("loaf", "loaves"),
        ("leaf", "leaves"),
        ("thief", "thieves"),
        ("knife", "knives"),
        ("wife", "wives"),
        ("life", "lives"),
        ("scarf", "scarves"),
        ("shoe", "shoes"),
    ]
});

static IRREGULAR_PLURALS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR.iter().map(|(s, p)| (*s, *p)).collect());

static IRREGULAR_SINGULARS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| IRREGULAR.iter().map(|(s, p)| (*p, *s)).collect());

/// Words pluralized by appending "es"
///
/// A singular ending in `-us` must be listed here (or in [`IRREGULAR`]); any
/// other word ending in `-us` is read as a plural such as `menus`.
static ES_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "alias", "atlas", "bus", "campus", "canvas", "census", "gas", "status", "virus", "bonus",
        "radius", "apparatus", "prospectus", "focus", "circus", "chorus", "plus", "minus",
        "hero", "potato", "tomato", "echo", "veto", "buffalo", "torpedo",
    ]
    .into_iter()
    .collect()
});

/// Singulars ending in `-che` that keep their `e` before a plural `s`
static CHE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "ache", "headache", "toothache", "backache", "earache", "stomachache", "cache", "niche",
        "quiche", "cliche", "creche", "avalanche", "mustache", "moustache", "psyche",
        "microfiche", "panache",
    ]
    .into_iter()
    .collect()
});

/// Pluralize an identifier, e.g. `User` -> `Users`, `organizationId` -> `organizationIDs`
pub fn plural(s: &str) -> String {
    inflect_last_word(s, plural_word)
}

/// Singularize an identifier, e.g. `People` -> `Person`
pub fn singular(s: &str) -> String {
    inflect_last_word(s, singular_word)
}

/// Whether `s` is a fixed point of [`plural`]
///
/// Only as precise as the inflection tables: uncountable words such as
/// `sheep` are reported as plural.
pub fn is_plural(s: &str) -> bool {
    s == plural(s)
}

/// Whether `s` is a fixed point of [`singular`]
pub fn is_singular(s: &str) -> bool {
    s == singular(s)
}

fn inflect_last_word(s: &str, inflect: fn(&str) -> String) -> String {
    let mut words: Vec<String> = split_words(s).iter().map(|w| w.to_lowercase()).collect();
    let Some(last) = words.last_mut() else {
        return String::new();
    };
    *last = inflect(last);

    let titled = words.iter().map(|w| title_word(w)).collect::<String>();

    if !s.chars().next().is_some_and(char::is_lowercase) {
        return titled;
    }

    // Keep the first word lowercase, including initialisms ("idCards", not "iDCards")
    let first_len = title_word(&words[0]).len();
    let (head, tail) = titled.split_at(first_len);
    if INITIALISMS.contains(head.trim_end_matches('s')) {
        format!("{}{}", head.to_lowercase(), tail)
    } else {
        lower_first(&titled)
    }
}

fn plural_word(w: &str) -> String {
    if w.is_empty() || UNCOUNTABLE.contains(w) {
        return w.to_string();
    }
    if let Some(p) = IRREGULAR_PLURALS.get(w) {
        return (*p).to_string();
    }
    if IRREGULAR_SINGULARS.contains_key(w) {
        return w.to_string();
    }
    if ES_WORDS.contains(w) {
        return format!("{}es", w);
    }
    if let Some(stem) = w.strip_suffix("sis") {
        return format!("{}ses", stem);
    }
    if ["ss", "sh", "ch", "x", "z"].iter().any(|suf| w.ends_with(suf)) {
        return format!("{}es", w);
    }
    // Already plural
    if w.ends_with('s') {
        return w.to_string();
    }
    if let Some(stem) = w.strip_suffix('y') {
        if stem.chars().last().is_some_and(|c| !is_vowel(c)) {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", w)
}

fn singular_word(w: &str) -> String {
    if w.is_empty() || UNCOUNTABLE.contains(w) {
        return w.to_string();
    }
    if let Some(s) = IRREGULAR_SINGULARS.get(w) {
        return (*s).to_string();
    }
    if IRREGULAR_PLURALS.contains_key(w) {
        return w.to_string();
    }
    if let Some(stem) = w.strip_suffix("es") {
        if ES_WORDS.contains(stem) {
            return stem.to_string();
        }
    }
    if let Some(stem) = w.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = w.strip_suffix("yses") {
        return format!("{}ysis", stem);
    }
    if let Some(stem) = w.strip_suffix('s') {
        if CHE_WORDS.contains(stem) {
            return stem.to_string();
        }
    }
    if ["sses", "shes", "ches", "xes", "zzes"].iter().any(|suf| w.ends_with(suf)) {
        return w[..w.len() - 2].to_string();
    }
    if ES_WORDS.contains(w) || ["ss", "is"].iter().any(|suf| w.ends_with(suf)) {
        return w.to_string();
    }
    match w.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => w.to_string(),
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Split an identifier into words on separators and case changes
///
/// Upper-case runs stay together (`HTTPServer` -> `HTTP`, `Server`) and a
/// plural initialism keeps its trailing `s` (`UserIDs` -> `User`, `IDs`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | ' ' | '.') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let boundary = if prev.is_lowercase() || prev.is_ascii_digit() {
                true
            } else if prev.is_uppercase() && next.is_some_and(char::is_lowercase) {
                // "IDs" is one word, "IDName" is two
                let plural_initialism = next == Some('s')
                    && !chars.get(i + 2).copied().is_some_and(char::is_lowercase)
                    && INITIALISMS.contains(format!("{}{}", current, c).to_uppercase().as_str());
                !plural_initialism
            } else {
                false
            };
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn title_word(word: &str) -> String {
    let upper = word.to_uppercase();
    if INITIALISMS.contains(upper.as_str()) {
        return upper;
    }
    if let Some(base) = upper.strip_suffix('S') {
        if INITIALISMS.contains(base) {
            return format!("{}s", base);
        }
    }
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an identifier to an exported Go identifier, e.g. `organizationId` -> `OrganizationID`
pub fn to_go(s: &str) -> String {
    split_words(s).iter().map(|w| title_word(w)).collect()
}

/// Lowercase the first character
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Convert an identifier to snake_case
pub fn to_snake(s: &str) -> String {
    s.to_snake_case()
}

/// First word of a CamelCase identifier, e.g. `UserRole` -> `User`
///
/// Used to group related models into a single generated file.
pub fn first_word(s: &str) -> String {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: String = chars
        .take_while(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect();
    if rest.is_empty() {
        // Leading initialism such as "APIKey"
        return split_words(s).into_iter().next().unwrap_or_default();
    }
    format!("{}{}", first, rest)
}

/// Shorten a package-qualified type reference for display
///
/// `*gitlab.com/org/app/graphql_models.FlowWhere` becomes `*FlowWhere`. Types
/// without a path separator keep their package (`*time.Time` stays as is)
/// unless the package is listed in `ignore_prefixes`. Leading `*` and `[]`
/// modifiers are preserved.
pub fn get_short_type(long_type: &str, ignore_prefixes: &[&str]) -> String {
    let body = long_type.trim_start_matches(['*', '[', ']']);
    let modifiers = &long_type[..long_type.len() - body.len()];

    if !body.contains('.') {
        return long_type.to_string();
    }

    let mut short = match body.rsplit_once('/') {
        Some((_, last)) => last
            .rsplit_once('.')
            .map(|(_, name)| name)
            .unwrap_or(last)
            .to_string(),
        None => body.to_string(),
    };

    for prefix in ignore_prefixes {
        if let Some(stripped) = short.strip_prefix(&format!("{}.", prefix)) {
            short = stripped.to_string();
        }
    }

    format!("{}{}", modifiers, short)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_basic() {
        assert_eq!(plural("User"), "Users");
        assert_eq!(plural("Category"), "Categories");
        assert_eq!(plural("Box"), "Boxes");
        assert_eq!(plural("Address"), "Addresses");
        assert_eq!(plural("Status"), "Statuses");
        assert_eq!(plural("Key"), "Keys");
        assert_eq!(plural("Analysis"), "Analyses");
    }

    #[test]
    fn test_plural_irregular() {
        assert_eq!(plural("Person"), "People");
        assert_eq!(plural("person"), "people");
        assert_eq!(plural("SalesPerson"), "SalesPeople");
        assert_eq!(plural("Child"), "Children");
        assert_eq!(singular("People"), "Person");
        assert_eq!(singular("Children"), "Child");
    }

    #[test]
    fn test_singular_basic() {
        assert_eq!(singular("Users"), "User");
        assert_eq!(singular("Categories"), "Category");
        assert_eq!(singular("Boxes"), "Box");
        assert_eq!(singular("Statuses"), "Status");
        assert_eq!(singular("Status"), "Status");
        assert_eq!(singular("Houses"), "House");
        assert_eq!(singular("Analyses"), "Analysis");
    }

    #[test]
    fn test_plural_keeps_initialisms() {
        assert_eq!(plural("OrganizationID"), "OrganizationIDs");
        assert_eq!(plural("organizationId"), "organizationIDs");
        assert_eq!(singular("organizationIDs"), "organizationID");
        assert_eq!(plural("id"), "ids");
    }

    #[test]
    fn test_case_of_first_character_is_preserved() {
        for s in ["user", "flowBlock", "person", "organizationId", "category"] {
            assert!(plural(s).starts_with(char::is_lowercase), "{}", s);
            assert!(singular(s).starts_with(char::is_lowercase), "{}", s);
        }
    }

    #[test]
    fn test_plural_is_fixed_point() {
        for s in ["User", "Person", "Category", "Status", "Box", "Analysis", "Wife", "Hero", "Quiz"] {
            let p = plural(s);
            assert!(is_plural(&p), "{} -> {}", s, p);
            assert!(!is_plural(s), "{}", s);
            let once = singular(&p);
            assert_eq!(singular(&once), once);
            assert_eq!(once, s);
        }
    }

    #[test]
    fn test_words_ending_in_u() {
        assert_eq!(plural("Menu"), "Menus");
        assert_eq!(plural("Menus"), "Menus");
        assert_eq!(singular("Menus"), "Menu");
        assert_eq!(singular("restaurantMenus"), "restaurantMenu");
        assert_eq!(plural("Guru"), "Gurus");
        assert_eq!(singular("Skus"), "Sku");
    }

    #[test]
    fn test_us_singulars() {
        assert_eq!(plural("Campus"), "Campuses");
        assert_eq!(plural("Radius"), "Radiuses");
        assert_eq!(singular("Campus"), "Campus");
        assert_eq!(singular("Campuses"), "Campus");
        assert_eq!(plural("Cactus"), "Cacti");
        assert_eq!(singular("Cacti"), "Cactus");
    }

    #[test]
    fn test_che_words_keep_their_e() {
        assert_eq!(plural("Cache"), "Caches");
        assert_eq!(singular("Caches"), "Cache");
        assert_eq!(singular("Niches"), "Niche");
        assert_eq!(singular("Headaches"), "Headache");
        assert_eq!(singular("Churches"), "Church");
        assert_eq!(singular("Watches"), "Watch");
        assert_eq!(singular("Dishes"), "Dish");
        assert_eq!(singular("Coaches"), "Coach");
        assert_eq!(singular("Beaches"), "Beach");
    }

    #[test]
    fn test_plural_of_plural_is_stable() {
        for s in [
            "Menu", "Emu", "Guru", "Sku", "Cache", "Niche", "Headache", "Campus", "Radius",
            "Church", "Dish", "Tax", "City", "Day", "Tomato", "User", "Person",
        ] {
            let p = plural(s);
            assert!(is_plural(&p), "{} -> {}", s, p);
            assert_eq!(singular(&p), s, "{} -> {}", s, p);
        }
    }

    #[test]
    fn test_is_plural_uncountable_limitation() {
        // Uncountable words are their own plural
        assert!(is_plural("sheep"));
        assert!(is_singular("sheep"));
    }

    #[test]
    fn test_to_go() {
        assert_eq!(to_go("id"), "ID");
        assert_eq!(to_go("user_id"), "UserID");
        assert_eq!(to_go("organizationId"), "OrganizationID");
        assert_eq!(to_go("url"), "URL");
        assert_eq!(to_go("pageInfo"), "PageInfo");
        assert_eq!(to_go("clientMutationId"), "ClientMutationID");
        assert_eq!(to_go("userIDs"), "UserIDs");
        assert_eq!(to_go("HTTPServer"), "HTTPServer");
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(split_words("UserIDs"), vec!["User", "IDs"]);
        assert_eq!(split_words("user_role"), vec!["user", "role"]);
        assert_eq!(split_words("IDName"), vec!["ID", "Name"]);
    }

    #[test]
    fn test_first_word() {
        assert_eq!(first_word("UserRole"), "User");
        assert_eq!(first_word("User"), "User");
        assert_eq!(first_word("APIKey"), "API");
        assert_eq!(first_word(""), "");
    }

    #[test]
    fn test_short_type() {
        assert_eq!(
            get_short_type("gitlab.com/product/app/backend/graphql_models.FlowWhere", &[]),
            "FlowWhere"
        );
        assert_eq!(
            get_short_type("*gitlab.com/product/app/backend/graphql_models.FlowWhere", &[]),
            "*FlowWhere"
        );
        assert_eq!(get_short_type("*be-generator/utils.GeoPoint", &[]), "*GeoPoint");
        assert_eq!(get_short_type("be-generator/utils.GeoPoint", &[]), "GeoPoint");
        assert_eq!(get_short_type("*string", &[]), "*string");
        assert_eq!(get_short_type("string", &[]), "string");
        assert_eq!(get_short_type("*time.Time", &[]), "*time.Time");
    }

    #[test]
    fn test_short_type_ignore_prefixes() {
        let ignore = ["graphql_models", "models"];
        assert_eq!(get_short_type("*graphql_models.User", &ignore), "*User");
        assert_eq!(get_short_type("[]*graphql_models.User", &ignore), "[]*User");
        assert_eq!(get_short_type("*time.Time", &ignore), "*time.Time");
        assert_eq!(get_short_type("graphql_models.UserRole", &ignore), "UserRole");
    }
}
