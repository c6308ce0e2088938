use rocks_lang::literal::Literal;
use rocks_lang::token::{Location, Token, Type};

#[test]
fn location_displays_as_a_bracketed_line_number() {
    assert_eq!(Location::new(3).to_string(), "[line 3]");
}

#[test]
fn tokens_with_the_same_type_lexeme_and_location_are_equal() {
    let a = Token::new(Type::Identifier, "foo".to_string(), None, Location::new(1));
    let b = Token::new(Type::Identifier, "foo".to_string(), None, Location::new(1));
    assert_eq!(a, b);
}

#[test]
fn tokens_at_different_locations_are_not_equal() {
    let a = Token::new(Type::Identifier, "foo".to_string(), None, Location::new(1));
    let b = Token::new(Type::Identifier, "foo".to_string(), None, Location::new(2));
    assert_ne!(a, b);
}

#[test]
fn tokens_with_different_lexemes_are_not_equal() {
    let a = Token::new(Type::Identifier, "foo".to_string(), None, Location::new(1));
    let b = Token::new(Type::Identifier, "bar".to_string(), None, Location::new(1));
    assert_ne!(a, b);
}

#[test]
fn from_str_produces_an_identifier_token_at_line_zero() {
    let token: Token = "foo".into();
    assert_eq!(token.r#type, Type::Identifier);
    assert_eq!(token.lexeme, "foo");
    assert_eq!(token.location, Location::new(0));
}

#[test]
fn display_includes_type_lexeme_literal_and_location() {
    let token = Token::new(Type::Number, "1".to_string(), Some(Literal::Number(1.0)), Location::new(5));
    let rendered = token.to_string();
    assert!(rendered.contains("Number"));
    assert!(rendered.contains('1'));
    assert!(rendered.contains("[line 5]"));
}
