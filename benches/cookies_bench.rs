use criterion::{black_box, criterion_group, criterion_main, Criterion};
use headerjar::cookies::canonicalcookie::CanonicalCookie;
use headerjar::cookies::monster::CookieMonster;
use url::Url;

fn benchmark_cookie_insert(c: &mut Criterion) {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com").unwrap();

    c.bench_function("cookie_parse_and_save", |b| {
        b.iter(|| {
            let _ = store.parse_and_save_cookie(
                black_box(&url),
                black_box("foo=bar; Path=/; Secure"),
            );
        })
    });
}

fn benchmark_cookie_get(c: &mut Criterion) {
    let store = CookieMonster::new();
    let url = Url::parse("https://example.com/foo/bar").unwrap();
    for i in 0..40 {
        store
            .parse_and_save_cookie(&url, &format!("cookie{}=val; Path=/foo", i))
            .unwrap();
    }

    c.bench_function("cookie_get_for_url", |b| {
        b.iter(|| black_box(store.get_cookies_for_url(black_box(&url))))
    });

    c.bench_function("cookie_header_for_url", |b| {
        b.iter(|| black_box(store.cookie_header_for_url(black_box(&url))))
    });
}

fn benchmark_set_cookie_parse(c: &mut Criterion) {
    let line = "Set-Cookie: sid=abc%20def; Domain=example.com; Path=/app; \
                Expires=Wed, 13 Jan 2038 22:23:01 GMT; Secure; HttpOnly; SameSite=Lax";

    c.bench_function("set_cookie_parse", |b| {
        b.iter(|| CanonicalCookie::from_set_cookie_str(black_box(line)))
    });
}

criterion_group!(
    benches,
    benchmark_cookie_insert,
    benchmark_cookie_get,
    benchmark_set_cookie_parse
);
criterion_main!(benches);
