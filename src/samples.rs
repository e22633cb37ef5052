use crate::domain::Prediction;

/// Labelled example emails for trying the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleEmail {
    pub id: u32,
    pub title: &'static str,
    pub expected: Prediction,
    pub text: &'static str,
}

pub fn find(id: u32) -> Option<&'static SampleEmail> {
    SAMPLES.iter().find(|s| s.id == id)
}

pub static SAMPLES: [SampleEmail; 12] = [
    SampleEmail {
        id: 1,
        title: "Lottery Winner",
        expected: Prediction::Spam,
        text: "CONGRATULATIONS!!! You have been selected as the WINNER of our $5,000,000 lottery! CLAIM your prize NOW by clicking this link: http://fake-lottery-scam.com. This offer expires in 24 HOURS! Act IMMEDIATELY! Call 1-800-FAKE-NUM to verify.",
    },
    SampleEmail {
        id: 2,
        title: "Meeting Reminder",
        expected: Prediction::Ham,
        text: "Hi Team,\n\nJust a reminder about our quarterly review meeting scheduled for tomorrow at 2:00 PM in Conference Room B. Please bring your Q4 reports.\n\nAgenda:\n- Q4 Performance Review\n- 2024 Goals Discussion\n- Budget Planning\n\nSee you there!\nBest regards,\nProject Manager",
    },
    SampleEmail {
        id: 3,
        title: "Nigerian Prince Scam",
        expected: Prediction::Spam,
        text: "Dear Friend, I am Prince Ahmed from Nigeria. I have $25 MILLION dollars that I need to transfer out of my country. I will give you 20% if you help me. Please send your bank account details and $5,000 processing fee to: prince.ahmed@example.com. URGENT! This is 100% LEGAL and SAFE!",
    },
    SampleEmail {
        id: 4,
        title: "Password Reset",
        expected: Prediction::Ham,
        text: "Hi there,\n\nWe received a request to reset your password. If this was you, click the link below:\n\nhttps://yourcompany.com/reset-password?token=abc123\n\nThis link expires in 1 hour. If you didn't request this, please ignore this email.\n\nThanks,\nSecurity Team",
    },
    SampleEmail {
        id: 5,
        title: "Crypto Investment",
        expected: Prediction::Spam,
        text: "🚀 AMAZING OPPORTUNITY! 🚀\nInvest in BitCoin TODAY and get 500% RETURNS in just 7 days!!! Our AI trading bot GUARANTEES profits! Limited spots available! Don't miss out!\n\n💰 Minimum investment: $500\n💰 Expected return: $2,500\n\nClick here NOW: http://crypto-scam-site.com\nOffer ends TONIGHT! ⏰",
    },
    SampleEmail {
        id: 6,
        title: "Order Confirmation",
        expected: Prediction::Ham,
        text: "Thank you for your order!\n\nOrder #12345\nDate: December 13, 2025\n\nItems:\n- Wireless Mouse x1 - $29.99\n- USB-C Cable x2 - $19.98\n\nSubtotal: $49.97\nShipping: $5.00\nTotal: $54.97\n\nEstimated delivery: Dec 18-20, 2025\nTracking number will be sent shortly.\n\nCustomer Service",
    },
    SampleEmail {
        id: 7,
        title: "Weight Loss Miracle",
        expected: Prediction::Spam,
        text: "LOSE 30 POUNDS IN 1 WEEK!!! 😱\n\nDoctors HATE this ONE WEIRD TRICK! No exercise! No diet! Just take our MAGIC pill!!!\n\n✅ 100% Natural\n✅ FDA Approved (lie)\n✅ Money Back Guarantee\n\nORDER NOW for 50% OFF!!!\nOnly $19.99 (normally $200)\n\nFREE shipping! Click here: http://diet-scam.com\nLimited time offer! BUY NOW!",
    },
    SampleEmail {
        id: 8,
        title: "Newsletter Subscription",
        expected: Prediction::Ham,
        text: "Welcome to TechNews Weekly!\n\nThank you for subscribing to our newsletter. You'll receive the latest technology news, reviews, and insights every Monday morning.\n\nIn this week's edition:\n- AI breakthroughs in 2025\n- Top 10 programming languages\n- Cloud computing trends\n\nIf you wish to unsubscribe, click here.\n\nHappy reading!\nTechNews Team",
    },
    SampleEmail {
        id: 9,
        title: "Phishing Alert",
        expected: Prediction::Spam,
        text: "URGENT SECURITY ALERT!\n\nYour PayPal account has been SUSPENDED due to suspicious activity!\n\nYou must verify your identity within 24 hours or your account will be PERMANENTLY CLOSED!\n\nClick here IMMEDIATELY: http://fake-paypal.com/verify\n\nEnter your:\n- Full name\n- Credit card number\n- CVV\n- Social Security Number\n\nDO NOT ignore this email!",
    },
    SampleEmail {
        id: 10,
        title: "Job Application Reply",
        expected: Prediction::Ham,
        text: "Dear Applicant,\n\nThank you for applying to the Software Engineer position at TechCorp.\n\nWe have reviewed your resume and would like to invite you for an initial phone screening interview.\n\nAvailable time slots:\n- Monday, Dec 16 at 10:00 AM\n- Tuesday, Dec 17 at 2:00 PM\n- Wednesday, Dec 18 at 11:00 AM\n\nPlease reply with your preferred time.\n\nBest regards,\nHR Department",
    },
    SampleEmail {
        id: 11,
        title: "Tax Refund Scam",
        expected: Prediction::Spam,
        text: "IRS NOTIFICATION:\n\nYou are eligible for a $3,847.00 tax refund!\n\nTo claim your refund, click here and enter:\n- SSN\n- Bank account number\n- Routing number\n\nProcess your refund NOW before it expires!\nhttp://fake-irs-refund.com\n\nOfficial IRS Department",
    },
    SampleEmail {
        id: 12,
        title: "Work from Home",
        expected: Prediction::Spam,
        text: "💼 WORK FROM HOME OPPORTUNITY! 💼\n\nEarn $10,000/month working ONLY 2 hours per day from your couch!\n\nNO experience needed!\nNO interview!\nNO boss!\n\nJust send $99 registration fee to get started!\n\n⭐ Unlimited earning potential\n⭐ Be your own boss\n⭐ Financial freedom\n\nJoin 10,000+ successful members!\nEmail: jobs@example.com",
    },
];
