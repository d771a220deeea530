// src/noyau/jetons.rs

/// Nature d'un jeton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Operator,
    LeftParen,
    RightParen,
    // Caractère non reconnu : rejeté plus loin (shunting-yard), pas ici.
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub precedence: Option<u8>,
    pub right_associative: bool,
    /// Position (octet) dans le texte source.
    pub position: usize,
}

impl Token {
    fn simple(kind: TokenKind, text: &str, position: usize) -> Self {
        Token {
            kind,
            text: text.to_string(),
            precedence: None,
            right_associative: false,
            position,
        }
    }

    fn operateur(c: char, precedence: u8, right_associative: bool, position: usize) -> Self {
        Token {
            kind: TokenKind::Operator,
            text: c.to_string(),
            precedence: Some(precedence),
            right_associative,
            position,
        }
    }

    /// Littéral synthétique (ex: le 0 injecté pour le moins unaire).
    pub(crate) fn nombre(text: &str, position: usize) -> Self {
        Self::simple(TokenKind::Number, text, position)
    }

    /// Moins unaire : s'évalue comme `0 - x`, mais lie comme `^` (droite, 4)
    /// pour que `2^-1` et `-2^2` gardent leur sens usuel.
    pub(crate) fn moins_unaire(position: usize) -> Self {
        Self::operateur('-', 4, true, position)
    }

    /// Précédence d'un opérateur (0 pour tout le reste).
    pub fn prec(&self) -> u8 {
        self.precedence.unwrap_or(0)
    }
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers (suite maximale de chiffres, sans signe)
/// - opérateurs ^ (4, droite), * / (3, gauche), + - (2, gauche)
/// - parenthèses ( )
///
/// N'échoue jamais : tout autre caractère devient un jeton `Unknown`.
pub fn tokenize(s: &str) -> Vec<Token> {
    let mut out = Vec::new();
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c.is_whitespace() {
            continue;
        }

        if c.is_ascii_digit() {
            let mut fin = i + 1;
            while let Some(&(j, d)) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                fin = j + 1;
                chars.next();
            }
            out.push(Token::simple(TokenKind::Number, &s[i..fin], i));
            continue;
        }

        let tok = match c {
            '(' => Token::simple(TokenKind::LeftParen, "(", i),
            ')' => Token::simple(TokenKind::RightParen, ")", i),
            '^' => Token::operateur(c, 4, true, i),
            '*' | '/' => Token::operateur(c, 3, false, i),
            '+' | '-' => Token::operateur(c, 2, false, i),
            _ => Token::simple(TokenKind::Unknown, &c.to_string(), i),
        };
        out.push(tok);
    }

    out
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
