//! Demo data pools and the initial database seed.
//!
//! Seeded entities are drawn from fixed name pools with the run's RNG so a
//! `--seed` flag reproduces the exact same fleet. All demo accounts share
//! one password; its argon2 hash is computed once and reused.

use argon2::password_hash::{rand_core::OsRng, PasswordHasher, SaltString};
use argon2::Argon2;
use rand::Rng;
use sqlx::PgPool;

use velofleet_core::status::BikeStatus;
use velofleet_db::models::{CreateBike, CreateUser};
use velofleet_db::repositories::{BikeRepo, UserRepo};

use crate::error::SimError;

/// Users created by the `seed` command.
pub const SEED_USER_COUNT: usize = 1000;
/// Bikes created by the `seed` command.
pub const SEED_BIKE_COUNT: usize = 200;
/// Password every demo account gets.
pub const DEMO_PASSWORD: &str = "password123";

pub const BIKE_BRANDS: &[&str] = &[
    "Peugeot",
    "B'Twin",
    "Gitane",
    "Lapierre",
    "Cannondale",
    "Trek",
    "Specialized",
];

const MODEL_WORDS: &[&str] = &[
    "Allure", "Boulevard", "Cadence", "Dynamo", "Estuaire", "Flèche", "Grimpeur", "Horizon",
    "Jetée", "Littoral", "Méridien", "Nocturne", "Orage", "Passage", "Quartier", "Rivage",
];

const FIRST_NAMES: &[&str] = &[
    "Adrien", "Amélie", "Antoine", "Camille", "Chloé", "Clément", "Élise", "Émile", "Gabriel",
    "Hugo", "Inès", "Jeanne", "Julien", "Léa", "Louis", "Lucie", "Manon", "Mathis", "Nadia",
    "Nicolas", "Olivier", "Pauline", "Quentin", "Romane", "Samir", "Sophie", "Théo", "Valentine",
    "Yanis", "Zoé",
];

const LAST_NAMES: &[&str] = &[
    "Bernard", "Blanchard", "Bouvier", "Carpentier", "Chevalier", "Delacroix", "Dubois",
    "Dupont", "Fontaine", "Garnier", "Giraud", "Lambert", "Lefèvre", "Lemoine", "Marchand",
    "Martin", "Mercier", "Moreau", "Perrin", "Petit", "Renard", "Rousseau", "Roux", "Tissier",
    "Vasseur", "Vidal",
];

/// Outcome of a seed run.
#[derive(Debug)]
pub struct SeedSummary {
    pub users: usize,
    pub bikes: usize,
}

/// Hash the shared demo password once.
pub fn demo_password_hash() -> Result<String, SimError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
        .map_err(|err| SimError::PasswordHash(err.to_string()))?;
    Ok(hash.to_string())
}

/// Draw `count` demo riders with unique usernames from the name pools.
pub fn demo_users<R: Rng>(count: usize, password_hash: &str, rng: &mut R) -> Vec<CreateUser> {
    let mut users = Vec::with_capacity(count);
    let mut taken = std::collections::HashSet::new();

    while users.len() < count {
        let first = FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())];
        let last = LAST_NAMES[rng.random_range(0..LAST_NAMES.len())];
        let suffix: u32 = rng.random_range(1..10_000);
        let username = format!(
            "{}.{}{}",
            sanitize(first),
            sanitize(last),
            suffix
        );
        if !taken.insert(username.clone()) {
            continue;
        }
        users.push(CreateUser {
            email: format!("{username}@example.org"),
            username,
            first_name: first.to_string(),
            last_name: last.to_string(),
            password_hash: password_hash.to_string(),
            is_admin: false,
        });
    }
    users
}

/// Draw one demo bike. Station assignment is left to the caller.
pub fn demo_bike<R: Rng>(rng: &mut R) -> CreateBike {
    let brand = BIKE_BRANDS[rng.random_range(0..BIKE_BRANDS.len())];
    let word = MODEL_WORDS[rng.random_range(0..MODEL_WORDS.len())];
    let number: u32 = rng.random_range(100..=900);
    let rate = (rng.random_range(3.0..10.0) * 100.0_f64).round() / 100.0;
    CreateBike {
        brand: brand.to_string(),
        model: format!("{word} {number}"),
        hourly_rate: rate,
        origin_station_id: None,
        current_station_id: None,
        status: BikeStatus::ALL[rng.random_range(0..BikeStatus::ALL.len())],
    }
}

/// Lowercase and strip accents/apostrophes for username use.
fn sanitize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            'à' | 'â' => Some('a'),
            'é' | 'è' | 'ê' | 'ë' => Some('e'),
            'î' | 'ï' => Some('i'),
            'ô' => Some('o'),
            'û' | 'ù' => Some('u'),
            'ç' => Some('c'),
            '\'' | ' ' => None,
            other => Some(other),
        })
        .collect()
}

/// Create the initial demo dataset: [`SEED_USER_COUNT`] riders and
/// [`SEED_BIKE_COUNT`] unassigned bikes, in one transaction.
///
/// Refuses to touch a database that already holds bikes or more than one
/// user (a lone admin account is tolerated).
pub async fn run_seed<R: Rng>(pool: &PgPool, rng: &mut R) -> Result<SeedSummary, SimError> {
    if BikeRepo::count(pool).await? > 0 || UserRepo::count(pool).await? > 1 {
        return Err(SimError::DatabaseNotEmpty);
    }

    tracing::info!(users = SEED_USER_COUNT, bikes = SEED_BIKE_COUNT, "seeding demo data");

    let password_hash = demo_password_hash()?;
    let users = demo_users(SEED_USER_COUNT, &password_hash, rng);

    let mut tx = pool.begin().await?;
    UserRepo::insert_many(&mut tx, &users).await?;
    for _ in 0..SEED_BIKE_COUNT {
        BikeRepo::create(&mut tx, &demo_bike(rng)).await?;
    }
    tx.commit().await?;

    tracing::info!("seed complete");
    Ok(SeedSummary {
        users: SEED_USER_COUNT,
        bikes: SEED_BIKE_COUNT,
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn demo_users_are_unique_and_complete() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let users = demo_users(500, "hash", &mut rng);
        assert_eq!(users.len(), 500);
        let usernames: std::collections::HashSet<_> =
            users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(usernames.len(), 500);
    }

    #[test]
    fn demo_users_are_riders_not_admins() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for user in demo_users(50, "hash", &mut rng) {
            assert!(!user.is_admin);
            assert!(user.email.ends_with("@example.org"));
        }
    }

    #[test]
    fn usernames_are_ascii_lowercase() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for user in demo_users(200, "hash", &mut rng) {
            assert!(
                user.username
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.'),
                "{}",
                user.username
            );
        }
    }

    #[test]
    fn demo_bike_fields_are_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            let bike = demo_bike(&mut rng);
            assert!(BIKE_BRANDS.contains(&bike.brand.as_str()));
            assert!((3.0..=10.0).contains(&bike.hourly_rate));
            assert!(bike.origin_station_id.is_none());
        }
    }

    #[test]
    fn same_seed_same_fleet() {
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            let x = demo_bike(&mut a);
            let y = demo_bike(&mut b);
            assert_eq!(x.brand, y.brand);
            assert_eq!(x.model, y.model);
        }
    }
}
