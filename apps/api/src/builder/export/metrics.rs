//! Static glyph-width tables for the PDF base-14 Helvetica faces.
//!
//! Widths are in thousandths of an em, taken from the Adobe AFM files. Tables
//! cover ASCII 0x20..=0x7E (95 printable characters); index = (char as usize) - 32.
//! Text is sanitized to ASCII before layout, so anything else uses the average width.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

impl Face {
    /// Resource name of the face in the page's font dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
        }
    }

    fn table(self) -> &'static FontMetricTable {
        match self {
            Face::Regular => &HELVETICA,
            Face::Bold => &HELVETICA_BOLD,
        }
    }
}

struct FontMetricTable {
    widths: [u16; 95],
    average_char_width: u16,
}

/// Width of `s` in points at `size_pt`.
pub fn measure_str(face: Face, s: &str, size_pt: f32) -> f32 {
    let table = face.table();
    let units: u32 = s
        .chars()
        .map(|c| {
            let code = c as usize;
            if (32..=126).contains(&code) {
                u32::from(table.widths[code - 32])
            } else {
                u32::from(table.average_char_width)
            }
        })
        .sum();
    units as f32 * size_pt / 1000.0
}

/// Greedy word wrap to `max_width` points. Explicit newlines start a new line;
/// a single word wider than the line is kept whole.
pub fn wrap(face: Face, text: &str, size_pt: f32, max_width: f32) -> Vec<String> {
    let space = measure_str(face, " ", size_pt);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            let word_width = measure_str(face, word, size_pt);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += space + word_width;
            }
        }
        lines.push(current);
    }
    lines
}

#[rustfmt::skip]
static HELVETICA: FontMetricTable = FontMetricTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_char_width: 556,
};

#[rustfmt::skip]
static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 611,
};
