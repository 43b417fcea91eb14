//! Public contract of template execution.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use bt_template::{
    BoxError, DirectiveDefinition, ExecuteError, Template, UnknownDirective, builtin, fetch_fn,
};
use pretty_assertions::assert_eq;

fn user(out: &mut dyn Write, path: &[u8]) -> Result<(), BoxError> {
    match path {
        b".id" => out.write_all(b"1")?,
        b".name" => out.write_all(b"jens")?,
        b".Name" => out.write_all(b"Sergey")?,
        _ => {}
    }
    Ok(())
}

fn run(template: &Template, input: &str) -> String {
    let mut out = Vec::new();
    template.execute(&mut out, input.as_bytes(), user).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_first_token_is_open() {
    assert_eq!(run(&Template::new(builtin::all()), "{"), "{");
}

#[test]
fn test_single_open() {
    assert_eq!(
        run(&Template::new(builtin::all()), "/api/user/{"),
        "/api/user/{"
    );
}

#[test]
fn test_simple_id() {
    let template = Template::new(builtin::all());
    for input in [
        "/api/user/{{.id }}",
        "/api/user/{{.id}}",
        "/api/user/{{ .id }}",
        "/api/user/{{  .id  }}",
    ] {
        assert_eq!(run(&template, input), "/api/user/1", "input {input:?}");
    }
}

#[test]
fn test_id_with_trailing_literal() {
    assert_eq!(
        run(&Template::new(builtin::all()), "/api/user/{{.id }}/friends"),
        "/api/user/1/friends"
    );
}

#[test]
fn test_multiple_variables() {
    assert_eq!(
        run(
            &Template::new(builtin::all()),
            "/api/user/{{ .id }}/{{ .name }}/{{.id}}"
        ),
        "/api/user/1/jens/1"
    );
}

#[test]
fn test_directive_with_item() {
    let template = Template::new([DirectiveDefinition::new("toLower", |out, arg| {
        out.write_all(&arg.to_ascii_lowercase())?;
        Ok(())
    })]);
    assert_eq!(
        run(&template, "/api/user/{{ toLower .Name }}"),
        "/api/user/sergey"
    );
}

#[test]
fn test_literal_only_is_repeatable() {
    let template = Template::new(builtin::all());
    let input = "/static/assets/app.css?v=2{ }";
    let first = run(&template, input);
    let second = run(&template, input);
    assert_eq!(first, input);
    assert_eq!(first, second);
}

#[test]
fn test_malformed_delimiters_are_literal() {
    let template = Template::new(builtin::all());
    for input in ["{{ .id", "{{ .id }", "}} .id {{", "{ .id }", "a{b}c"] {
        assert_eq!(run(&template, input), input, "input {input:?}");
    }
}

#[test]
fn test_fetch_error_stops_rendering() {
    let template = Template::new(builtin::all());
    let mut out = Vec::new();
    let mut seen = Vec::new();

    let result = template.execute(
        &mut out,
        b"/a/{{ .id }}/{{ .secret }}/{{ toUpper .name }}",
        fetch_fn(|w, path| {
            seen.push(String::from_utf8_lossy(path).into_owned());
            if path == b".secret" {
                return Err("access denied".into());
            }
            user(w, path)
        }),
    );

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "failed to fetch value for path `.secret`");
    assert_eq!(out, b"/a/1/");
    assert_eq!(seen, vec![".id".to_owned(), ".secret".to_owned()]);
}

#[test]
fn test_unknown_directive_policies() {
    let input = "/u/{{ shout .name }}";

    let strict = Template::new(builtin::all());
    let err = strict.render(input.as_bytes(), user).unwrap_err();
    assert!(matches!(err, ExecuteError::UnknownDirective { .. }));

    let lenient = Template::builder()
        .directives(builtin::all())
        .unknown_directive(UnknownDirective::PassThrough)
        .build();
    assert_eq!(run(&lenient, input), "/u/jens");

    let literal = Template::builder()
        .unknown_directive(UnknownDirective::Literal)
        .build();
    assert_eq!(run(&literal, input), input);
}

#[test]
fn test_shared_across_threads() {
    let template = Arc::new(Template::new(builtin::all()));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let template = Arc::clone(&template);
            thread::spawn(move || {
                let input = format!("/t/{i}/{{{{ toUpper .name }}}}");
                let out = template.render(input.as_bytes(), user).unwrap();
                String::from_utf8(out).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("/t/{i}/JENS"));
    }
}

#[test]
fn test_execute_into_trait_object_sink() {
    let template = Template::new(builtin::all());
    let mut buf = Vec::new();
    let sink: &mut dyn Write = &mut buf;

    let written = template
        .execute(sink, b"{{ pathEscape .name }}!", user)
        .unwrap();

    assert_eq!(written, 5);
    assert_eq!(buf, b"jens!");
}
