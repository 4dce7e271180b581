//! Hard-coded place catalog.
//!
//! The feed is queried by place name, so the catalog only needs to offer a
//! stable list of names grouped by district. Coordinates exist for a handful
//! of places; everything else falls back to Seoul City Hall.

/// A district and the monitored places inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct District {
    pub name: &'static str,
    pub places: &'static [&'static str],
}

const DISTRICTS: &[District] = &[
    District {
        name: "강남구",
        places: &["강남 MICE 관광특구", "코엑스", "강남역", "선릉역", "역삼역", "압구정로데오거리"],
    },
    District {
        name: "종로구",
        places: &["광화문·덕수궁", "경복궁", "보신각", "창덕궁·종묘", "인사동", "청계천"],
    },
    District {
        name: "마포구",
        places: &["홍대 관광특구", "홍대입구역", "망원한강공원", "상수역", "연남동"],
    },
    District {
        name: "용산구",
        places: &["이태원 관광특구", "용산역", "남산타워", "국립중앙박물관·용산가족공원"],
    },
    District {
        name: "송파구",
        places: &["잠실 관광특구", "롯데월드", "석촌호수", "잠실한강공원"],
    },
    District {
        name: "영등포구",
        places: &["여의도", "영등포 타임스퀘어", "여의도한강공원", "63빌딩"],
    },
];

const COORDINATES: &[(&str, (f64, f64))] = &[
    ("광화문·덕수궁", (37.5665, 126.9779)),
    ("강남 MICE 관광특구", (37.508, 127.060)),
    ("홍대 관광특구", (37.5563, 126.9239)),
    ("잠실 관광특구", (37.5145, 127.1056)),
    ("용산역", (37.5294, 126.9646)),
];

/// Seoul City Hall, used when a place has no known coordinates.
pub const DEFAULT_COORDINATES: (f64, f64) = (37.5665, 126.9780);

/// Districts sorted by name.
pub fn districts() -> Vec<&'static District> {
    let mut out: Vec<&'static District> = DISTRICTS.iter().collect();
    out.sort_by(|a, b| a.name.cmp(b.name));
    out
}

/// Places of one district sorted by name, or `None` for an unknown district.
pub fn places_in(district: &str) -> Option<Vec<&'static str>> {
    let found = DISTRICTS.iter().find(|d| d.name == district)?;
    let mut places = found.places.to_vec();
    places.sort_unstable();
    Some(places)
}

/// The district a place belongs to.
pub fn find_district(place: &str) -> Option<&'static District> {
    DISTRICTS.iter().find(|d| d.places.contains(&place))
}

/// `(latitude, longitude)` for a place.
pub fn coordinates(place: &str) -> (f64, f64) {
    COORDINATES
        .iter()
        .find(|(name, _)| *name == place)
        .map(|(_, coords)| *coords)
        .unwrap_or(DEFAULT_COORDINATES)
}
