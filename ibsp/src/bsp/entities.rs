use ahash::AHashMap;
use glam::Vec3;

use crate::error::EntityError;

/// One `{ "key" "value" ... }` block of the entity lump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    properties: AHashMap<String, String>,
}

impl Entity {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn class_name(&self) -> Option<&str> {
        self.get("classname")
    }

    /// `origin` parsed as three whitespace separated floats.
    pub fn origin(&self) -> Option<Vec3> {
        parse_vec3(self.get("origin")?)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

pub fn parse_vec3(value: &str) -> Option<Vec3> {
    let mut parts = value.split_whitespace().map(str::parse::<f32>);
    let v = Vec3::new(
        parts.next()?.ok()?,
        parts.next()?.ok()?,
        parts.next()?.ok()?,
    );
    parts.next().is_none().then_some(v)
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Open,
    Close,
    Str(&'a str),
}

struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn skip_blank(&mut self) {
        loop {
            let rest = &self.text[self.pos..];
            let trimmed = rest.trim_start();
            self.pos += rest.len() - trimmed.len();

            if trimmed.starts_with("//") {
                self.pos += trimmed.find('\n').unwrap_or(trimmed.len());
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<(usize, Token<'a>)>, EntityError> {
        self.skip_blank();
        let start = self.pos;
        let rest = &self.text[start..];

        let token = match rest.chars().next() {
            None => return Ok(None),
            Some('{') => {
                self.pos += 1;
                Token::Open
            }
            Some('}') => {
                self.pos += 1;
                Token::Close
            }
            Some('"') => {
                let len = rest[1..]
                    .find('"')
                    .ok_or(EntityError::UnexpectedEof("a quoted string"))?;
                self.pos += len + 2;
                Token::Str(&rest[1..1 + len])
            }
            Some(_) => {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                return Err(EntityError::UnexpectedToken {
                    found: rest[..end].to_owned(),
                    offset: start,
                    expected: "'{', '}' or a quoted string",
                });
            }
        };

        Ok(Some((start, token)))
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Open => "{".to_owned(),
        Token::Close => "}".to_owned(),
        Token::Str(s) => format!("\"{s}\""),
    }
}

/// Parses the entity lump text into its entities, in file order.
///
/// Later duplicates of a key within one entity replace earlier ones.
pub fn parse_entities(text: &str) -> Result<Vec<Entity>, EntityError> {
    let mut tokens = Tokens { text, pos: 0 };
    let mut entities = Vec::new();

    while let Some((offset, token)) = tokens.next_token()? {
        if token != Token::Open {
            return Err(EntityError::UnexpectedToken {
                found: describe(&token),
                offset,
                expected: "'{'",
            });
        }

        let mut entity = Entity::default();
        loop {
            let key = match tokens.next_token()? {
                Some((_, Token::Close)) => break,
                Some((_, Token::Str(key))) => key,
                Some((offset, token)) => {
                    return Err(EntityError::UnexpectedToken {
                        found: describe(&token),
                        offset,
                        expected: "a key or '}'",
                    })
                }
                None => return Err(EntityError::UnexpectedEof("an entity")),
            };

            let value = match tokens.next_token()? {
                Some((_, Token::Str(value))) => value,
                Some((offset, token)) => {
                    return Err(EntityError::UnexpectedToken {
                        found: describe(&token),
                        offset,
                        expected: "a value",
                    })
                }
                None => return Err(EntityError::UnexpectedEof("an entity")),
            };

            entity.properties.insert(key.to_owned(), value.to_owned());
        }

        entities.push(entity);
    }

    Ok(entities)
}
