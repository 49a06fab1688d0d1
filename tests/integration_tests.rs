//! Integration tests for csv-mask

use csv_mask::{Engine, LayoutDescriptor, MaskError, Masker, SemanticType, Separator, classify};
use regex::Regex;
use std::io::Cursor;
use std::io::Write;
use tempfile::{NamedTempFile, tempdir};

const SAMPLE: &str = "\
EMAIL|CPF|UF|DATA
joao.silva@empresa.com|123.456.789-00|SP|01/06/2023
maria@loja.com.br|987.654.321-11|RJ|15/02/2022
";

fn pipe_layout() -> LayoutDescriptor {
    LayoutDescriptor::new(Separator::Pipe, 1).with_header(0, 0)
}

#[test]
fn test_end_to_end_row_shape() {
    let (out, report) = Masker::new(pipe_layout()).transform_str(SAMPLE).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "EMAIL|CPF|UF|DATA");
    assert_eq!(
        report.column_types.as_slice(),
        &[
            SemanticType::Email,
            SemanticType::Cpf,
            SemanticType::RegionCode,
            SemanticType::Date
        ]
    );

    let fields: Vec<&str> = lines[1].split('|').collect();
    assert_eq!(fields.len(), 4);

    let (local, domain) = fields[0].split_once('@').unwrap();
    assert_eq!(local.len(), "joao.silva".len());
    assert_eq!(domain.len(), "empresa.com".len());
    assert!(domain.ends_with(".com"));

    let cpf = Regex::new(r"^\d{3}\.\d{3}\.\d{3}-\d{2}$").unwrap();
    assert!(cpf.is_match(fields[1]));

    assert_eq!(fields[2].len(), 2);
    assert!(fields[2].chars().all(|c| c.is_ascii_uppercase()));

    let date = Regex::new(r"^\d{2}/\d{2}/(\d{4})$").unwrap();
    let caps = date.captures(fields[3]).unwrap();
    let year: u32 = caps[1].parse().unwrap();
    assert!((2020..=2025).contains(&year));
}

#[test]
fn test_runs_are_reproducible() {
    let (first, _) = Masker::new(pipe_layout()).transform_str(SAMPLE).unwrap();
    let (second, _) = Masker::new(pipe_layout()).transform_str(SAMPLE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_referential_consistency() {
    let data = "\
cliente;cidade
Padaria Sol Ltda;Recife
Mercado Lua Ltda;Natal
Padaria Sol Ltda;Recife
";
    let layout = LayoutDescriptor::new(Separator::Semicolon, 1).with_header(0, 0);
    let (out, _) = Masker::new(layout).transform_str(data).unwrap();
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[1], lines[3]);
    assert_ne!(lines[1], lines[2]);
}

#[test]
fn test_engine_matches_pipeline() {
    let (out, _) = Masker::new(pipe_layout()).transform_str(SAMPLE).unwrap();
    let masked_cpf = out.lines().nth(1).unwrap().split('|').nth(1).unwrap();

    let mut engine = Engine::new();
    assert_eq!(engine.anonymize("123.456.789-00", SemanticType::Cpf), masked_cpf);
}

#[test]
fn test_shape_preserved_for_text_and_digits() {
    let mut engine = Engine::new();
    let cases = [
        ("Maria Aparecida da Silva", SemanticType::Person),
        ("Comercial Boa Vista Ltda.", SemanticType::Organization),
        ("observação: cliente VIP", SemanticType::GenericText),
        ("12.345.678/0001-90", SemanticType::Cnpj),
        ("1.234.567,89", SemanticType::Amount),
        ("000123", SemanticType::Number),
    ];

    for (value, t) in cases {
        let masked = engine.anonymize(value, t);
        assert_eq!(masked.chars().count(), value.chars().count(), "{value}");

        let letters = t.is_textual();
        for (a, b) in value.chars().zip(masked.chars()) {
            let target = if letters { a.is_alphabetic() } else { a.is_ascii_digit() };
            if !target {
                assert_eq!(a, b, "{value} -> {masked}");
            }
        }
    }
}

#[test]
fn test_classifier_threshold() {
    // 35 emails, the rest of the column empty
    let mut rows: Vec<String> = (0..35).map(|i| format!("user{i}@mail.com|x")).collect();
    rows.extend((0..65).map(|_| "|x".to_string()));
    let types = classify(&rows, Separator::Pipe);
    assert_eq!(types.get(0), SemanticType::Email);

    // 25% emails, noise spread thinly over other types
    let noise = ["42", "SP", "Ana Souza", "2023-01-01", "10,50", "Acme Ltda", "?"];
    let mut rows: Vec<String> = (0..25).map(|i| format!("user{i}@mail.com")).collect();
    rows.extend((0..75).map(|i| noise[i % noise.len()].to_string()));
    let types = classify(&rows, Separator::Pipe);
    assert_eq!(types.get(0), SemanticType::GenericText);
}

#[test]
fn test_type_fixed_by_sample() {
    // after the sample window the column changes kind; the sampled type wins
    let mut data = String::from("n\n");
    for i in 0..150 {
        data.push_str(&format!("{i}\n"));
    }
    data.push_str("Texto livre\n");

    let layout = LayoutDescriptor::new(Separator::Comma, 1).with_header(0, 0);
    let (out, report) = Masker::new(layout).transform_str(&data).unwrap();

    assert_eq!(report.column_types.get(0), SemanticType::Number);
    let last = out.lines().last().unwrap();
    // digit masking leaves letters alone
    assert_eq!(last, "Texto livre");
}

#[test]
fn test_transform_reader() {
    let cursor = Cursor::new(SAMPLE.as_bytes().to_vec());
    let mut out = Vec::new();

    let report = Masker::new(pipe_layout())
        .transform_reader(cursor, &mut out)
        .unwrap();

    assert_eq!(report.data_rows, 2);
    assert_eq!(String::from_utf8(out).unwrap().lines().count(), 3);
}

#[test]
fn test_transform_path() {
    let mut input = NamedTempFile::new().unwrap();
    write!(input, "{SAMPLE}").unwrap();
    input.flush().unwrap();

    let dir = tempdir().unwrap();
    let output = dir.path().join("nested").join("ANON_sample.txt");

    let report = Masker::new(pipe_layout())
        .transform_path(input.path(), &output)
        .unwrap();

    assert_eq!(report.encoding, Some("UTF-8"));
    assert_eq!(report.preview.len(), 2);
    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("EMAIL|CPF|UF|DATA\n"));
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_transform_path_latin1() {
    // "nome;cidade\nJoão Silva;São Paulo\n" in Windows-1252
    let mut bytes = b"nome;cidade\nJo".to_vec();
    bytes.push(0xE3);
    bytes.extend_from_slice(b"o Silva;S");
    bytes.push(0xE3);
    bytes.extend_from_slice(b"o Paulo\n");

    let mut input = NamedTempFile::new().unwrap();
    input.write_all(&bytes).unwrap();
    input.flush().unwrap();

    let dir = tempdir().unwrap();
    let output = dir.path().join("ANON_latin1.txt");
    let layout = LayoutDescriptor::new(Separator::Semicolon, 1).with_header(0, 0);
    let report = Masker::new(layout).transform_path(input.path(), &output).unwrap();

    assert_ne!(report.encoding, Some("UTF-8"));
    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().next(), Some("nome;cidade"));
    assert_eq!(report.data_rows, 1);
}

#[test]
fn test_invalid_byte_after_encoding_window() {
    // clean UTF-8 well past the 64 KiB sniffed for the encoding, then one Latin-1 byte
    let mut bytes = b"nome|cidade\n".to_vec();
    for i in 0..5000 {
        bytes.extend_from_slice(format!("Cliente {i}|Recife\n").as_bytes());
    }
    assert!(bytes.len() > 64 * 1024);
    bytes.extend_from_slice(b"Jo\xE3o|Natal\n");

    let mut input = NamedTempFile::new().unwrap();
    input.write_all(&bytes).unwrap();
    input.flush().unwrap();

    let dir = tempdir().unwrap();
    let output = dir.path().join("out.txt");
    let report = Masker::new(pipe_layout())
        .transform_path(input.path(), &output)
        .unwrap();

    assert_eq!(report.encoding, Some("UTF-8"));
    assert_eq!(report.data_rows, 5001);
    let written = std::fs::read_to_string(&output).unwrap();
    let last = written.lines().last().unwrap();
    assert_eq!(last.split('|').count(), 2);
    assert_eq!(last.chars().count(), "Jo\u{FFFD}o|Natal".chars().count());
}

#[test]
fn test_utf8_bom_stripped() {
    let mut input = NamedTempFile::new().unwrap();
    input.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
    write!(input, "{SAMPLE}").unwrap();
    input.flush().unwrap();

    let dir = tempdir().unwrap();
    let output = dir.path().join("out.txt");
    Masker::new(pipe_layout())
        .transform_path(input.path(), &output)
        .unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("EMAIL|"));
}

#[test]
fn test_data_start_out_of_range() {
    let layout = LayoutDescriptor::new(Separator::Pipe, 99);
    let result = Masker::new(layout).transform_str(SAMPLE);
    assert!(matches!(result, Err(MaskError::DataStartOutOfRange { .. })));
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    let result =
        Masker::new(pipe_layout()).transform_path(dir.path().join("nope.txt"), dir.path().join("o.txt"));
    assert!(matches!(result, Err(MaskError::Io(_))));
}

#[test]
fn test_tab_separated() {
    let data = "id\tnome\n1\tCarlos Eduardo\n2\tBeatriz Costa\n";
    let layout = LayoutDescriptor::new(Separator::Tab, 1).with_header(0, 0);
    let (out, report) = Masker::new(layout).transform_str(data).unwrap();

    assert_eq!(report.column_types.get(0), SemanticType::Number);
    assert_eq!(report.column_types.get(1), SemanticType::Person);
    for line in out.lines().skip(1) {
        assert_eq!(line.split('\t').count(), 2);
    }
}
