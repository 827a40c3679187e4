/// Canned inputs for trying the analyzer without writing anything.
pub struct Sample {
    pub name: &'static str,
    pub label: &'static str,
    pub text: &'static str,
}

pub static SAMPLES: [Sample; 3] = [
    Sample {
        name: "product-review",
        label: "Product Review",
        text: "I absolutely love this product! It exceeded all my expectations. The quality is outstanding and the customer service was incredibly helpful. However, the shipping took a bit longer than expected, which was slightly frustrating. Overall, I would highly recommend this to anyone looking for a reliable solution.",
    },
    Sample {
        name: "social-media",
        label: "Social Media",
        text: "Just tried the new restaurant downtown and I'm completely disappointed. The food was cold, service was slow, and prices were way too high for what you get. The only saving grace was the nice ambiance and the friendly host. Won't be coming back anytime soon. 👎",
    },
    Sample {
        name: "app-feedback",
        label: "App Feedback",
        text: "The app is okay. It does what it's supposed to do. The interface is clean but nothing special. I've used similar apps before and this one doesn't really stand out. It works fine for basic needs.",
    },
];

pub fn find_sample(name: &str) -> Option<&'static Sample> {
    SAMPLES.iter().find(|s| s.name.eq_ignore_ascii_case(name.trim()))
}
