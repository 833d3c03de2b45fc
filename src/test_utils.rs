#[cfg(test)]
pub mod test_utils {
    use std::path::{Path, PathBuf};

    use chrono::NaiveDate;
    use migration::{Migrator, MigratorTrait};
    use model::entities::{
        category, credit_purchase, debt_snapshot, exercise, financial_entry, habit, habit_record,
        installment, workout_set,
    };
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, DbErr, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level comes from RUST_LOG, defaulting to WARN. Logging stops
    /// when the returned guard is dropped.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Ids of the seeded rows the configuration has to point at.
    #[derive(Debug, Clone, Copy)]
    pub struct Seeded {
        pub debt_payment_category_id: i32,
        pub bench_id: i32,
        pub pull_up_id: i32,
        pub hrr_id: i32,
    }

    /// One month of realistic backend data around `2025-10-18`:
    /// salary and groceries in September and October, a card payment of 200,
    /// a credit purchase of 150, a 1000 debt snapshot in September, two
    /// habits and a few weeks of training.
    pub async fn seed_backend(db: &DatabaseConnection, with_habits: bool) -> Result<Seeded, DbErr> {
        let new_category = |name: &str| category::ActiveModel {
            name: Set(name.to_string()),
            ..Default::default()
        };
        let income = new_category("Entradas").insert(db).await?;
        let market = new_category("Mercado").insert(db).await?;
        let card = new_category("Pagamento cartão").insert(db).await?;

        let entries = [
            (income.id, date(2025, 9, 5), 5000, "Salario"),
            (income.id, date(2025, 10, 5), 5000, "Salario"),
            (market.id, date(2025, 9, 12), -500, "Compras"),
            (market.id, date(2025, 10, 12), -620, "Compras"),
            (market.id, date(2025, 10, 14), -300, "Reserva mensal"),
            (card.id, date(2025, 10, 10), -200, "Fatura"),
        ];
        for (category_id, on, amount, label) in entries {
            financial_entry::ActiveModel {
                amount: Set(Decimal::new(amount, 0)),
                category_id: Set(category_id),
                recorded_at: Set(on.and_hms_opt(12, 0, 0).unwrap()),
                label: Set(Some(label.to_string())),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        debt_snapshot::ActiveModel {
            amount: Set(Decimal::new(1000, 0)),
            date: Set(date(2025, 9, 30)),
            ..Default::default()
        }
        .insert(db)
        .await?;
        credit_purchase::ActiveModel {
            amount: Set(Decimal::new(150, 0)),
            date: Set(date(2025, 10, 3)),
            ..Default::default()
        }
        .insert(db)
        .await?;
        for (month, paid) in [(10, true), (11, false), (12, false)] {
            installment::ActiveModel {
                amount: Set(Decimal::new(50, 0)),
                due_date: Set(date(2025, month, 15)),
                paid: Set(paid),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        if with_habits {
            let reading = habit::ActiveModel {
                name: Set("Leitura".to_string()),
                active: Set(true),
                ..Default::default()
            }
            .insert(db)
            .await?;
            habit::ActiveModel {
                name: Set("Meditação".to_string()),
                active: Set(true),
                ..Default::default()
            }
            .insert(db)
            .await?;
            for day in 1..=10 {
                habit_record::ActiveModel {
                    habit_id: Set(reading.id),
                    date: Set(date(2025, 10, day)),
                    level: Set(((day % 4) + 1) as i32),
                    ..Default::default()
                }
                .insert(db)
                .await?;
            }
        }

        let new_exercise = |name: &str, primary: &str, secondary: Option<&str>| exercise::ActiveModel {
            name: Set(name.to_string()),
            primary_muscle: Set(primary.to_string()),
            secondary_muscles: Set(secondary.map(str::to_string)),
            ..Default::default()
        };
        let bench = new_exercise("Supino", "Peito", Some("Tríceps")).insert(db).await?;
        let pull_up = new_exercise("Barra fixa", "Costas", Some("Bíceps")).insert(db).await?;
        let hrr = new_exercise("HRR", "HRR", None).insert(db).await?;

        let sets = [
            (bench.id, date(2025, 10, 16), "70", "8"),
            (bench.id, date(2025, 10, 16), "70", "8"),
            (bench.id, date(2025, 10, 2), "60", "10"),
            (pull_up.id, date(2025, 10, 14), "0", "9"),
            (pull_up.id, date(2025, 10, 14), "10", "12"),
            (hrr.id, date(2025, 10, 17), "0", "38"),
            (hrr.id, date(2025, 10, 9), "0", "abc"),
        ];
        for (exercise_id, on, weight, reps) in sets {
            workout_set::ActiveModel {
                exercise_id: Set(exercise_id),
                weight: Set(Some(weight.to_string())),
                reps: Set(Some(reps.to_string())),
                duration: Set(None),
                performed_at: Set(on.and_hms_opt(18, 30, 0).unwrap()),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }

        Ok(Seeded {
            debt_payment_category_id: card.id,
            bench_id: bench.id,
            pull_up_id: pull_up.id,
            hrr_id: hrr.id,
        })
    }

    /// Writes a configuration file for the seeded backend at `url`.
    pub fn write_settings(dir: &Path, url: &str, seeded: Seeded) -> PathBuf {
        let contents = format!(
            r#"
[source]
url = "{url}"

[finance]
debt_payment_category_id = {payment}

[workout]
body_weight_kg = 80
hrr_exercise_id = {hrr}

[[workout.lifts]]
name = "Supino"
exercise_id = {bench}
ranks = [{{ label = "F", floor = 0 }}, {{ label = "E", floor = 0.75 }}, {{ label = "C", floor = 1.0 }}]

[[workout.lifts]]
name = "Barra fixa"
exercise_id = {pull_up}
mode = "bodyweight_reps"
ranks = [{{ label = "F", floor = 1 }}, {{ label = "D", floor = 8 }}, {{ label = "B", floor = 15 }}]

[assets]
overlay_dir = "{assets}"
body_image = "{assets}/body.png"

[output]
path = "{output}"
"#,
            payment = seeded.debt_payment_category_id,
            hrr = seeded.hrr_id,
            bench = seeded.bench_id,
            pull_up = seeded.pull_up_id,
            assets = dir.join("assets").display(),
            output = dir.join("relatorio.pdf").display(),
        );
        let path = dir.join("lifeledger.toml");
        std::fs::write(&path, contents).expect("Failed to write settings");
        path
    }
}
