use serde::Serialize;

/// One fixed report section: its heading and what it should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionSpec {
    pub title: &'static str,
    pub description: &'static str,
}

pub const TOTAL_SECTIONS: usize = 8;

/// The report outline, in authoring order.
pub static SECTIONS: [SectionSpec; TOTAL_SECTIONS] = [
    SectionSpec {
        title: "산업 개요 및 시장 동향",
        description: "산업의 정의, 현황, 최신 트렌드",
    },
    SectionSpec {
        title: "시장 규모 및 성장 전망",
        description: "구체적인 시장 규모 데이터와 성장 예측",
    },
    SectionSpec {
        title: "주요 경쟁사 분석",
        description: "주요 플레이어들의 현황과 포지셔닝",
    },
    SectionSpec {
        title: "핵심 기술 및 혁신 동향",
        description: "기술적 발전과 혁신 사례",
    },
    SectionSpec {
        title: "타겟 고객 및 시장 세그먼트",
        description: "주요 고객층과 시장 세분화",
    },
    SectionSpec {
        title: "사업 기회 및 진입 전략",
        description: "시장 기회와 전략적 접근",
    },
    SectionSpec {
        title: "리스크 요인 및 대응 방안",
        description: "잠재적 위험과 완화 전략",
    },
    SectionSpec {
        title: "결론 및 향후 전망",
        description: "종합 분석과 미래 전망",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_is_fixed() {
        assert_eq!(TOTAL_SECTIONS, 8);
        assert_eq!(SECTIONS[0].title, "산업 개요 및 시장 동향");
        assert_eq!(SECTIONS[7].title, "결론 및 향후 전망");
    }

    #[test]
    fn titles_are_unique() {
        let mut titles: Vec<_> = SECTIONS.iter().map(|s| s.title).collect();
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), TOTAL_SECTIONS);
    }
}
