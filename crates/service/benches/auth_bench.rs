use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::{domain::{LoginRequest, RegisterRequest}, AuthService};
use service::domain::Role;
use service::security::{Argon2Hasher, PasswordHasher, TokenConfig};
use service::uow::{memory::MemoryStore, Store, UnitOfWork};

fn tokens() -> TokenConfig {
    TokenConfig { secret: "bench-secret-0123456789".into(), issuer: "news".into(), audience: "web".into(), expire_minutes: 60 }
}

fn bench_login(c: &mut Criterion) {
    let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

    // pre-create the account outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = AuthService::new(UnitOfWork::new(store.clone()), hasher.clone(), tokens());
    let _ = rt.block_on(svc.register(RegisterRequest {
        account_name: "Bench".into(),
        account_email: "bench@example.com".into(),
        account_password: "Benchmark1".into(),
        account_role: Role::Staff,
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            // one unit of work per request, as the HTTP layer does
            let svc = AuthService::new(UnitOfWork::new(store.clone()), hasher.clone(), tokens());
            let session = rt
                .block_on(svc.login(LoginRequest { email: "bench@example.com".into(), password: "Benchmark1".into() }))
                .unwrap();
            assert!(session.is_some());
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
