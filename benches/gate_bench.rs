use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mivet_gate::access::{init_role_ui, Gate};
use mivet_gate::markup::{Element, PageMarkup};
use mivet_gate::navigation::Navigator;
use mivet_gate::navigation::Location;
use mivet_gate::storage::MemoryStorage;
use mivet_gate::{Page, Session};

struct Discard;

impl Navigator for Discard {
    fn redirect(&self, _to: &Location) {}
}

fn stored(role: &str) -> MemoryStorage {
    let raw = format!(r#"{{"id":1,"displayName":"B","email":"b@clinica.mx","roleName":"{role}"}}"#);
    MemoryStorage::with_entry("veterinaryUser", &raw)
}

fn gate_benchmarks(c: &mut Criterion) {
    let admin = Gate::new(stored("Administrador"), Discard);
    c.bench_function("require_page_admitted", |b| {
        b.iter(|| {
            black_box(admin.require_page(black_box(Page::AddAccount)))
        })
    });

    // A refused role clears the session, so re-seed the storage on every iteration.
    c.bench_function("require_page_refused", |b| {
        b.iter(|| {
            let gate = Gate::new(stored("Recepcionista"), Discard);
            black_box(gate.require_page(black_box(Page::Accounts)))
        })
    });

    let session = Session::from_json(r#"{"id":1,"email":"b@clinica.mx","roleName":"Veterinario"}"#)
        .expect("bench session");
    let mut nav: Vec<Element> = (0..64)
        .map(|i| {
            let roles = if i % 2 == 0 { "Administrador" } else { "Veterinario,Recepcionista" };
            Element::new().with_id(&format!("nav-{i}")).with_attr("data-roles", roles)
        })
        .collect();
    nav.push(Element::new().with_id("linkMascotas").with_href("mascotas.html"));
    let page = PageMarkup::new(nav);

    c.bench_function("init_role_ui_64", |b| {
        b.iter(|| {
            let mut page = page.clone();
            init_role_ui(&session, &mut page);
            black_box(page)
        })
    });
}

criterion_group!(benches, gate_benchmarks);
criterion_main!(benches);
