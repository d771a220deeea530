// src/noyau/rpn.rs
//
// Shunting-yard -> RPN (postfix)
// Objectif:
// - Convertir une suite de Token en RPN, une seule fois
// - La RPN est ensuite parcourue deux fois (passe bornes, passe numérique)
//   sans être consommée : Postfix est immuable et partagé.
//
// Règles:
// - ^ associatif à droite : 2^3^2 = 2^(3^2)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, on injecte 0 : "-x" => "0 x -"
// - Tout jeton Unknown est refusé ici (MalformedExpression).

use std::fmt;
use std::sync::Arc;

use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{format_tokens, Token, TokenKind};

/// Suite postfix immuable (clonage = partage).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Postfix(Arc<[Token]>);

impl Postfix {
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Suite arbitraire, sans passer par le shunting-yard (tests de l'évaluateur).
    #[cfg(test)]
    pub(crate) fn from_tokens_unchecked(tokens: Vec<Token>) -> Self {
        Postfix(tokens.into())
    }
}

impl<'a> IntoIterator for &'a Postfix {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tokens(&self.0))
    }
}

/// o2 (sommet de pile) doit-il sortir avant d'empiler o1 ?
fn doit_depiler(o1: &Token, o2: &Token) -> bool {
    if o2.kind != TokenKind::Operator {
        return false;
    }
    if o1.right_associative {
        o1.prec() < o2.prec()
    } else {
        o1.prec() <= o2.prec()
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: 3 + 4 * 2
///   rpn:    3 4 2 * +
pub fn to_rpn(tokens: &[Token]) -> Resultat<Postfix> {
    if tokens.is_empty() {
        return Err(ErreurNoyau::EmptyExpression);
    }

    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens {
        match tok.kind {
            TokenKind::Number => {
                out.push(tok.clone());
                prev_was_value = true;
            }

            TokenKind::Operator => {
                if tok.text == "-" && !prev_was_value {
                    // moins unaire : 0 en sortie, puis l'opérateur sans rien dépiler
                    out.push(Token::nombre("0", tok.position));
                    ops.push(Token::moins_unaire(tok.position));
                    continue;
                }

                while let Some(top) = ops.last() {
                    if !doit_depiler(tok, top) {
                        break;
                    }
                    if let Some(o2) = ops.pop() {
                        out.push(o2);
                    }
                }

                ops.push(tok.clone());
                prev_was_value = false;
            }

            TokenKind::LeftParen => {
                ops.push(tok.clone());
                prev_was_value = false;
            }

            TokenKind::RightParen => {
                // dépile jusqu’à '('
                let mut trouve = false;
                while let Some(top) = ops.pop() {
                    if top.kind == TokenKind::LeftParen {
                        trouve = true;
                        break;
                    }
                    out.push(top);
                }

                if !trouve {
                    return Err(ErreurNoyau::MismatchedParentheses {
                        texte: tok.text.clone(),
                        position: tok.position,
                    });
                }

                prev_was_value = true;
            }

            TokenKind::Unknown => {
                return Err(ErreurNoyau::malformee(&tok.text, tok.position));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op.kind == TokenKind::LeftParen {
            return Err(ErreurNoyau::MismatchedParentheses {
                texte: op.text,
                position: op.position,
            });
        }
        out.push(op);
    }

    Ok(Postfix(out.into()))
}
