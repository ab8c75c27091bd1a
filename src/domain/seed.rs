//! Static startup data for Jago Futsal Center.
//!
//! The service has no persistence; these literals are the whole world at
//! boot. Seeded bookings reference legacy numeric field ids that are not in
//! the catalog, and joins must cope with that.

use chrono::{DateTime, NaiveDate, Utc};

use super::availability::FieldAvailability;
use super::booking::{Booking, BookingStatus};
use super::field::{Field, FieldType, Specifications, Venue, VenueContact};
use super::pricing::{BandRates, PricingMatrix, TimeRange};
use super::review::Review;
use super::user::{Role, User};
use super::{BookingId, FieldId, UserId};

/// Default admin login handle.
pub const ADMIN_EMAIL: &str = "admin@jagofutsal.com";

/// The futsal center profile.
#[must_use]
pub fn venue() -> Venue {
    Venue {
        id: "jago-futsal-center".to_string(),
        name: "Jago Futsal Center".to_string(),
        location: "Jakarta Selatan".to_string(),
        address: "Jl. Raya Kebayoran Lama No. 123, Jakarta Selatan 12240".to_string(),
        description: "Pusat futsal terdepan di Jakarta Selatan dengan 3 lapangan berkualitas \
                      tinggi. Dilengkapi fasilitas modern dan pelayanan terbaik."
            .to_string(),
        rating: 4.8,
        total_reviews: 324,
        facilities: [
            "Parkir Luas",
            "Ruang Ganti AC",
            "Mushola",
            "Kantin",
            "Toilet Bersih",
            "WiFi Gratis",
            "Sound System",
            "Tribun Penonton",
            "CCTV Security",
            "Locker",
        ]
        .into_iter()
        .map(str::to_string)
        .collect(),
        operating_hours: "06:00 - 24:00".to_string(),
        contact: VenueContact {
            phone: "+62 21 1234 5678".to_string(),
            email: "info@jagofutsal.com".to_string(),
            whatsapp: "+62 812 3456 7890".to_string(),
        },
    }
}

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

const fn rates(morning: u64, night: u64) -> BandRates {
    BandRates { morning, night }
}

/// The three courts, with empty availability.
#[must_use]
pub fn fields() -> Vec<Field> {
    vec![
        Field {
            id: FieldId::new("lapangan-a"),
            name: "Lapangan A (Indoor Premium)".to_string(),
            field_type: FieldType::Indoor,
            size: "Standar FIFA (40m x 20m)".to_string(),
            description: "Lapangan indoor premium dengan rumput sintetis berkualitas tinggi, \
                          sistem AC, dan pencahayaan LED profesional."
                .to_string(),
            images: tags(&[
                "https://images.unsplash.com/photo-1551698618-1dfe5d97d256?w=800&h=600&fit=crop",
                "https://images.unsplash.com/photo-1529900748604-07564a03e7a6?w=800&h=600&fit=crop",
            ]),
            specifications: Specifications {
                length: 40,
                width: 20,
                surface: "Rumput Sintetis Premium (FIFA Quality)".to_string(),
                lighting: "LED Professional (500 Lux)".to_string(),
                capacity: 50,
            },
            features: tags(&[
                "AC Full Blast",
                "Sound System",
                "Scoreboard Digital",
                "Tribun VIP",
            ]),
            rating: 4.9,
            price_per_hour: 200_000,
            is_active: true,
            pricing: PricingMatrix {
                weekday: rates(180_000, 220_000),
                weekend: rates(220_000, 280_000),
            },
            availability: FieldAvailability::new(),
        },
        Field {
            id: FieldId::new("lapangan-b"),
            name: "Lapangan B (Indoor Standard)".to_string(),
            field_type: FieldType::Indoor,
            size: "Standar (38m x 18m)".to_string(),
            description: "Lapangan indoor dengan ventilasi alami dan pencahayaan yang baik. \
                          Ideal untuk latihan tim dan bermain santai."
                .to_string(),
            images: tags(&[
                "https://images.unsplash.com/photo-1574629810360-7efbbe195018?w=800&h=600&fit=crop",
            ]),
            specifications: Specifications {
                length: 38,
                width: 18,
                surface: "Rumput Sintetis Standard".to_string(),
                lighting: "LED Standard (300 Lux)".to_string(),
                capacity: 30,
            },
            features: tags(&["Ventilasi Baik", "Sound System Basic", "Papan Skor Manual"]),
            rating: 4.7,
            price_per_hour: 150_000,
            is_active: true,
            pricing: PricingMatrix {
                weekday: rates(130_000, 170_000),
                weekend: rates(170_000, 200_000),
            },
            availability: FieldAvailability::new(),
        },
        Field {
            id: FieldId::new("lapangan-c"),
            name: "Lapangan C (Outdoor)".to_string(),
            field_type: FieldType::Outdoor,
            size: "Standar (40m x 20m)".to_string(),
            description: "Lapangan outdoor dengan suasana terbuka dan udara segar, dilengkapi \
                          pencahayaan untuk bermain malam hari."
                .to_string(),
            images: tags(&[
                "https://images.unsplash.com/photo-1543326727-cf6c39e8f84c?w=800&h=600&fit=crop",
            ]),
            specifications: Specifications {
                length: 40,
                width: 20,
                surface: "Rumput Sintetis Weather Resistant".to_string(),
                lighting: "LED Outdoor (400 Lux)".to_string(),
                capacity: 40,
            },
            features: tags(&[
                "Open Air",
                "Night Light",
                "Weather Resistant",
                "Tribun Outdoor",
            ]),
            rating: 4.5,
            price_per_hour: 120_000,
            is_active: true,
            pricing: PricingMatrix {
                weekday: rates(100_000, 140_000),
                weekend: rates(140_000, 160_000),
            },
            availability: FieldAvailability::new(),
        },
    ]
}

fn timestamp(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

fn user(id: &str, name: &str, email: &str, phone: &str, role: Role, created: &str) -> User {
    User {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: Some(phone.to_string()),
        role,
        created_at: timestamp(created),
    }
}

/// Seeded accounts, including the admin.
#[must_use]
pub fn users() -> Vec<User> {
    vec![
        user(
            "u1",
            "John Doe",
            "john.doe@email.com",
            "081234567890",
            Role::User,
            "2025-01-01T00:00:00Z",
        ),
        user(
            "u2",
            "Jane Smith",
            "jane.smith@email.com",
            "081234567891",
            Role::User,
            "2025-02-15T00:00:00Z",
        ),
        user(
            "admin1",
            "Admin User",
            ADMIN_EMAIL,
            "081234567892",
            Role::Admin,
            "2024-12-01T00:00:00Z",
        ),
        user(
            "u3",
            "Ahmad Rizki",
            "ahmad.rizki@email.com",
            "081234567893",
            Role::User,
            "2025-03-01T00:00:00Z",
        ),
        user(
            "u4",
            "Siti Nurhaliza",
            "siti.nur@email.com",
            "081234567894",
            Role::User,
            "2025-03-15T00:00:00Z",
        ),
    ]
}

struct SeedBooking<'a> {
    field_id: &'a str,
    user_id: &'a str,
    field_name: &'a str,
    date: (i32, u32, u32),
    hours: (u8, u8),
    price_per_hour: u64,
    players: u32,
    status: BookingStatus,
    created_at: &'a str,
    customer: (&'a str, &'a str),
}

impl SeedBooking<'_> {
    fn build(self) -> Option<Booking> {
        let (y, m, d) = self.date;
        let date = NaiveDate::from_ymd_opt(y, m, d)?;
        let time = TimeRange::new(self.hours.0, self.hours.1).ok()?;
        Some(Booking {
            id: BookingId::new(),
            field_id: FieldId::new(self.field_id),
            user_id: UserId::new(self.user_id),
            field_name: self.field_name.to_string(),
            date,
            time,
            players: self.players,
            price_per_hour: self.price_per_hour,
            total_price: self.price_per_hour * u64::from(time.duration()),
            status: self.status,
            created_at: timestamp(self.created_at),
            customer_name: self.customer.0.to_string(),
            customer_phone: self.customer.1.to_string(),
            payment_method: None,
        })
    }
}

/// Seeded bookings covering every status.
#[must_use]
pub fn bookings() -> Vec<Booking> {
    let seeds = [
        SeedBooking {
            field_id: "1",
            user_id: "u1",
            field_name: "Lapangan Futsal Premium A",
            date: (2025, 6, 25),
            hours: (19, 21),
            price_per_hour: 200_000,
            players: 10,
            status: BookingStatus::Confirmed,
            created_at: "2025-06-20T10:00:00Z",
            customer: ("John Doe", "081234567890"),
        },
        SeedBooking {
            field_id: "2",
            user_id: "u2",
            field_name: "Arena Futsal Champion",
            date: (2025, 6, 22),
            hours: (15, 17),
            price_per_hour: 120_000,
            players: 8,
            status: BookingStatus::Completed,
            created_at: "2025-06-18T14:30:00Z",
            customer: ("Jane Smith", "081234567891"),
        },
        SeedBooking {
            field_id: "1",
            user_id: "u3",
            field_name: "Lapangan Futsal Premium A",
            date: (2025, 6, 28),
            hours: (20, 22),
            price_per_hour: 200_000,
            players: 12,
            status: BookingStatus::Pending,
            created_at: "2025-06-21T16:00:00Z",
            customer: ("Ahmad Rizki", "081234567893"),
        },
        SeedBooking {
            field_id: "3",
            user_id: "u4",
            field_name: "Star Futsal Club",
            date: (2025, 6, 20),
            hours: (16, 18),
            price_per_hour: 100_000,
            players: 8,
            status: BookingStatus::Cancelled,
            created_at: "2025-06-15T12:00:00Z",
            customer: ("Siti Nurhaliza", "081234567894"),
        },
        SeedBooking {
            field_id: "4",
            user_id: "u1",
            field_name: "Elite Futsal Arena",
            date: (2025, 6, 30),
            hours: (18, 20),
            price_per_hour: 230_000,
            players: 10,
            status: BookingStatus::Confirmed,
            created_at: "2025-06-22T09:00:00Z",
            customer: ("John Doe", "081234567890"),
        },
    ];
    seeds.into_iter().filter_map(SeedBooking::build).collect()
}

fn review(id: &str, field_id: &str, customer: &str, rating: u8, comment: &str, created: &str) -> Review {
    Review {
        id: id.to_string(),
        field_id: FieldId::new(field_id),
        customer_name: customer.to_string(),
        rating,
        comment: comment.to_string(),
        created_at: timestamp(created),
    }
}

/// Seeded customer reviews for the first two courts.
#[must_use]
pub fn reviews() -> Vec<Review> {
    vec![
        review(
            "r1",
            "lapangan-a",
            "Ahmad Rizki",
            5,
            "Lapangan sangat bagus, fasilitas lengkap dan pelayanan memuaskan!",
            "2025-06-15T09:00:00Z",
        ),
        review(
            "r2",
            "lapangan-a",
            "Budi Santoso",
            4,
            "Tempat strategis dan lapangan berkualitas. Recommended!",
            "2025-06-10T16:30:00Z",
        ),
        review(
            "r3",
            "lapangan-b",
            "Citra Dewi",
            5,
            "Pelayanan ramah dan lapangan terawat dengan baik.",
            "2025-06-12T11:15:00Z",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::SLOTS_PER_DAY;

    #[test]
    fn seed_pricing_is_positive() {
        for field in fields() {
            assert!(field.pricing.rates().iter().all(|r| *r > 0), "{}", field.id);
        }
    }

    #[test]
    fn seed_bookings_totals_match_rate_times_duration() {
        let all = bookings();
        assert_eq!(all.len(), 5);
        for b in &all {
            assert_eq!(b.total_price, b.price_per_hour * u64::from(b.time.duration()));
        }
    }

    #[test]
    fn seed_reviews_point_at_catalog_fields() {
        let ids: Vec<FieldId> = fields().into_iter().map(|f| f.id).collect();
        for r in reviews() {
            assert!(ids.contains(&r.field_id), "{}", r.id);
            assert!((1..=5).contains(&r.rating));
        }
    }

    #[test]
    fn seed_has_exactly_one_admin() {
        let admins = users().into_iter().filter(|u| u.is_admin()).count();
        assert_eq!(admins, 1);
    }

    #[test]
    fn seed_availability_is_empty() {
        for field in fields() {
            assert!(field.availability.is_empty());
            assert_eq!(field.availability.day(NaiveDate::MIN).slots().len(), SLOTS_PER_DAY);
        }
    }
}
