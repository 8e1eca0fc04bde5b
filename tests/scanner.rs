#[cfg(test)]
mod scanner_tests {
    use fwjs_interpreter as fwjs;

    use fwjs::error::FwjsError;
    use fwjs::scanner::*;
    use fwjs::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*,+%;})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::PERCENT, "%"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_operators() {
        assert_token_sequence(
            "= == < <= > >= - /",
            &[
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::MINUS, "-"),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "var function if else while print true false null fn _x1",
            &[
                (TokenType::VAR, "var"),
                (TokenType::FUNCTION, "function"),
                (TokenType::IF, "if"),
                (TokenType::ELSE, "else"),
                (TokenType::WHILE, "while"),
                (TokenType::PRINT, "print"),
                (TokenType::TRUE, "true"),
                (TokenType::FALSE, "false"),
                (TokenType::NULL, "null"),
                (TokenType::IDENTIFIER, "fn"),
                (TokenType::IDENTIFIER, "_x1"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_integer_literal_payload() {
        let tokens = tokenize("42 007").unwrap();

        assert!(matches!(tokens[0].token_type, TokenType::INT(42)));
        assert!(matches!(tokens[1].token_type, TokenType::INT(7)));
        assert_eq!(tokens[1].lexeme, "007");
        assert_eq!(tokens[0].to_string(), "INT 42 42");
        assert_eq!(tokens[2].to_string(), "EOF  null");
    }

    #[test]
    fn test_integer_overflow_is_lex_error() {
        let err = tokenize("99999999999999999999").unwrap_err();

        assert!(matches!(err, FwjsError::Lex { line: 1, .. }));
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_comments_and_line_numbers() {
        let tokens = tokenize("x // ignored ( {\n// whole line\ny").unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].lexeme, "x");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].lexeme, "y");
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].token_type, TokenType::EOF);
    }

    #[test]
    fn test_single_eof_and_fused() {
        let mut scanner = Scanner::new("");

        assert!(matches!(scanner.next(), Some(Ok(ref t)) if t.token_type == TokenType::EOF));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",;$(#é";
        let results: Vec<_> = Scanner::new(source).collect();

        // 0: COMMA ','
        // 1: SEMICOLON ';'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: Error for 'é' (one error for the whole character)
        // 6: EOF
        assert_eq!(results.len(), 7, "Expected 7 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::SEMICOLON, ";");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[6], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(errors.len(), 3, "Expected 3 error messages");
        assert_eq!(errors[0], "[line 1] Error: Unexpected character: $");
        assert_eq!(errors[2], "[line 1] Error: Unexpected character: é");

        fn assert_token_matches(
            result: &Result<Token, FwjsError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_tokens_serialize_to_json() {
        let tokens = tokenize("x 5").unwrap();

        assert_eq!(
            serde_json::to_string(&tokens[0]).unwrap(),
            r#"{"token_type":"IDENTIFIER","lexeme":"x","line":1}"#
        );
        assert_eq!(
            serde_json::to_string(&tokens[1]).unwrap(),
            r#"{"token_type":{"INT":5},"lexeme":"5","line":1}"#
        );
    }
}
