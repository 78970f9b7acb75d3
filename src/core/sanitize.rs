// src/core/sanitize.rs

/// Named entities seen on the hours pages. Anything else is left verbatim.
const NAMED_ENTITIES: &[(&str, char)] = &[
    ("nbsp", ' '),
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("ndash", '–'),
    ("mdash", '—'),
    ("lsquo", '‘'),
    ("rsquo", '’'),
    ("ldquo", '“'),
    ("rdquo", '”'),
    ("hellip", '…'),
    ("middot", '·'),
    ("aacute", 'á'), ("Aacute", 'Á'),
    ("agrave", 'à'), ("Agrave", 'À'),
    ("acirc", 'â'), ("Acirc", 'Â'),
    ("auml", 'ä'), ("Auml", 'Ä'),
    ("atilde", 'ã'), ("Atilde", 'Ã'),
    ("aring", 'å'), ("Aring", 'Å'),
    ("ccedil", 'ç'), ("Ccedil", 'Ç'),
    ("eacute", 'é'), ("Eacute", 'É'),
    ("egrave", 'è'), ("Egrave", 'È'),
    ("ecirc", 'ê'), ("Ecirc", 'Ê'),
    ("euml", 'ë'), ("Euml", 'Ë'),
    ("iacute", 'í'), ("Iacute", 'Í'),
    ("igrave", 'ì'), ("Igrave", 'Ì'),
    ("icirc", 'î'), ("Icirc", 'Î'),
    ("iuml", 'ï'), ("Iuml", 'Ï'),
    ("ntilde", 'ñ'), ("Ntilde", 'Ñ'),
    ("oacute", 'ó'), ("Oacute", 'Ó'),
    ("ograve", 'ò'), ("Ograve", 'Ò'),
    ("ocirc", 'ô'), ("Ocirc", 'Ô'),
    ("ouml", 'ö'), ("Ouml", 'Ö'),
    ("otilde", 'õ'), ("Otilde", 'Õ'),
    ("uacute", 'ú'), ("Uacute", 'Ú'),
    ("ugrave", 'ù'), ("Ugrave", 'Ù'),
    ("ucirc", 'û'), ("Ucirc", 'Û'),
    ("uuml", 'ü'), ("Uuml", 'Ü'),
];

/// Longest entity body we bother looking for a `;` within.
const MAX_ENTITY_LEN: usize = 10;

/// Decode `&name;`, `&#NNN;` and `&#xHH;`. Non-breaking spaces become plain spaces
/// so `normalize_ws` can collapse them.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];

        let semi = tail
            .char_indices()
            .take(MAX_ENTITY_LEN + 1)
            .find(|&(_, c)| c == ';')
            .map(|(i, _)| i);

        let decoded = semi.and_then(|end| decode_one(&tail[..end]).map(|ch| (ch, end)));
        match decoded {
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_one(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return match code {
            0xA0 => Some(' '),
            _ => char::from_u32(code),
        };
    }
    NAMED_ENTITIES
        .iter()
        .find(|(name, _)| *name == body)
        .map(|&(_, ch)| ch)
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Fold accented Latin letters to ASCII and typographic quotes/dashes to their
/// plain forms. Characters without a mapping pass through.
pub fn fold_diacritics(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match fold_char(ch) {
            Some(folded) => out.push_str(folded),
            None => out.push(ch),
        }
    }
    out
}

fn fold_char(ch: char) -> Option<&'static str> {
    let folded = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' | 'ā' => "a",
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' | 'Ā' => "A",
        'ç' | 'ć' | 'č' => "c",
        'Ç' | 'Ć' | 'Č' => "C",
        'é' | 'è' | 'ê' | 'ë' | 'ē' | 'ę' => "e",
        'É' | 'È' | 'Ê' | 'Ë' | 'Ē' | 'Ę' => "E",
        'í' | 'ì' | 'î' | 'ï' | 'ī' => "i",
        'Í' | 'Ì' | 'Î' | 'Ï' | 'Ī' => "I",
        'ñ' | 'ń' => "n",
        'Ñ' | 'Ń' => "N",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' | 'ō' => "o",
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' | 'Ø' | 'Ō' => "O",
        'ú' | 'ù' | 'û' | 'ü' | 'ū' => "u",
        'Ú' | 'Ù' | 'Û' | 'Ü' | 'Ū' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        '‘' | '’' | '‚' | '′' | '`' | '´' => "'",
        '“' | '”' | '„' | '″' => "\"",
        '–' | '—' | '‒' | '−' => "-",
        _ => return None,
    };
    Some(folded)
}
